use super::*;

struct Script {
    polls: Vec<RawTouch>,
    calls: usize,
}

impl Script {
    fn new(polls: &[RawTouch]) -> Self {
        Self {
            polls: polls.to_vec(),
            calls: 0,
        }
    }
}

impl TouchSource for Script {
    fn poll(&mut self) -> RawTouch {
        let raw = self
            .polls
            .get(self.calls)
            .copied()
            .unwrap_or_default();
        self.calls += 1;
        raw
    }
}

fn touch(code: u8, x: i16, y: i16) -> RawTouch {
    RawTouch {
        code,
        x,
        y,
        contacts: 1,
    }
}

#[test]
fn codes_classify_by_touching_bit_and_end_codes() {
    for code in [1, 3, 5, 7, 9, 11, 13, 15] {
        assert_eq!(classify(code, 1), TouchState::Touching, "code {code}");
    }
    for code in [2, 6, 10, 14] {
        assert_eq!(classify(code, 0), TouchState::Released, "code {code}");
    }
    for code in [0, 4, 8, 12, 16, 200, 255] {
        assert_eq!(
            classify(code & !CODE_TOUCHING_BIT, 0),
            TouchState::None,
            "code {code}"
        );
    }
    assert_eq!(classify(1, 2), TouchState::MultiTouch);
}

#[test]
fn polls_are_rate_limited() {
    let mut adapter = TouchAdapter::new(25);
    let mut source = Script::new(&[touch(3, 10, 20), touch(1, 30, 40)]);

    let first = adapter.update(1_000, &mut source);
    assert_eq!(first.state, TouchState::Touching);
    assert_eq!(first.point, Point::new(10, 20));

    assert_eq!(adapter.update(1_024, &mut source), first);
    assert_eq!(source.calls, 1);

    let second = adapter.update(1_025, &mut source);
    assert_eq!(second.point, Point::new(30, 40));
    assert_eq!(source.calls, 2);
}

#[test]
fn point_only_updates_while_touching() {
    let mut adapter = TouchAdapter::new(25);
    let multi = RawTouch {
        code: 1,
        x: 300,
        y: 5,
        contacts: 2,
    };
    let mut source = Script::new(&[touch(3, 100, 120), touch(2, 0, 0), multi, touch(0, 7, 7)]);

    adapter.update(0, &mut source);
    let released = adapter.update(25, &mut source);
    assert_eq!(released.state, TouchState::Released);
    assert_eq!(released.point, Point::new(100, 120));

    let multi = adapter.update(50, &mut source);
    assert_eq!(multi.state, TouchState::MultiTouch);
    assert_eq!(multi.point, Point::new(100, 120));

    let idle = adapter.update(75, &mut source);
    assert_eq!(idle.state, TouchState::None);
    assert_eq!(idle.point, Point::new(100, 120));
}
