//! 链路干扰判断

use crate::config::InterferenceModel;
use crate::error::SimResult;
use crate::mesh::{Link, Topology};

/// 两条链路是否干扰（对称，对方向不敏感）。
///
/// 共享端点的链路总是干扰；`Range` 模型下，`s1-s2`、`s1-d2`、`s2-d1`
/// 任一距离小于 `range` 也视为干扰。
pub fn interfere(a: &Link, b: &Link, model: InterferenceModel, topo: &Topology) -> SimResult<bool> {
    if a.shares_endpoint(b) {
        return Ok(true);
    }
    match model {
        InterferenceModel::SharedEndpoint => Ok(false),
        InterferenceModel::Range { range } => {
            let close = |x, y| -> SimResult<bool> { Ok(topo.distance(x, y)? < range) };
            Ok(close(a.source, b.source)?
                || close(a.source, b.destination)?
                || close(b.source, a.destination)?)
        }
    }
}
