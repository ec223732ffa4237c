use crate::error::SimResult;
use crate::sim::{Event, EventKind, SimTime, Simulator, World};

/// 记录处理顺序；每个 SCHEDULE 在 `step` 之后再调度一个，直到 `limit`。
#[derive(Default)]
struct RecordingWorld {
    seen: Vec<(SimTime, EventKind)>,
    ticks: usize,
    step: SimTime,
    limit: usize,
}

impl World for RecordingWorld {
    fn handle(&mut self, ev: Event, sim: &mut Simulator) -> SimResult<()> {
        self.seen.push((ev.time, ev.kind));
        if ev.kind == EventKind::Schedule && self.seen.len() < self.limit {
            sim.schedule(Event::schedule(sim.now().saturating_add(self.step)));
        }
        Ok(())
    }

    fn on_tick(&mut self, _sim: &mut Simulator) -> SimResult<()> {
        self.ticks = self.ticks.saturating_add(1);
        Ok(())
    }
}

#[test]
fn run_drains_queue_in_time_order() {
    let mut sim = Simulator::default();
    let mut world = RecordingWorld {
        step: SimTime(100),
        limit: 0,
        ..Default::default()
    };
    sim.schedule(Event::schedule(SimTime(10)));
    sim.schedule(Event::schedule(SimTime(5)));
    sim.schedule(Event::schedule(SimTime(5)));

    let n = sim.run(&mut world).unwrap();
    assert_eq!(n, 3);
    assert_eq!(world.ticks, 3);
    assert_eq!(
        world.seen.iter().map(|(t, _)| *t).collect::<Vec<_>>(),
        vec![SimTime(5), SimTime(5), SimTime(10)]
    );
    assert_eq!(sim.now(), SimTime(10));
    assert_eq!(sim.pending(), 0);
}

#[test]
fn handlers_can_schedule_follow_up_events() {
    let mut sim = Simulator::default();
    let mut world = RecordingWorld {
        step: SimTime(7),
        limit: 4,
        ..Default::default()
    };
    sim.schedule(Event::schedule(SimTime::ZERO));
    sim.run(&mut world).unwrap();

    assert_eq!(world.seen.len(), 4);
    assert_eq!(sim.now(), SimTime(21));
}

struct StopAfter {
    handled: usize,
    max: usize,
}

impl World for StopAfter {
    fn handle(&mut self, _ev: Event, _sim: &mut Simulator) -> SimResult<()> {
        self.handled += 1;
        Ok(())
    }

    fn is_done(&self, _sim: &Simulator) -> bool {
        self.handled >= self.max
    }
}

#[test]
fn run_stops_when_world_reports_done() {
    let mut sim = Simulator::default();
    for t in 0..10 {
        sim.schedule(Event::schedule(SimTime(t)));
    }
    let mut world = StopAfter { handled: 0, max: 4 };
    assert_eq!(sim.run(&mut world).unwrap(), 4);
    assert_eq!(sim.pending(), 6);
    assert_eq!(sim.now(), SimTime(3));
}
