#![no_main]

use libfuzzer_sys::fuzz_target;
use opgram::config::NgramConfig;
use opgram::sequence::{split_key, DepthPolicy, NgramTracer, StepEvent, KEY_DELIMITER};

fuzz_target!(|input: (u8, bool, Vec<StepEvent>)| {
    let (order, reset, steps) = input;
    let order = 2 + (order % 6) as usize;
    let policy = if reset {
        DepthPolicy::Reset
    } else {
        DepthPolicy::CarryForward
    };

    let config = NgramConfig::new(order).unwrap().with_policy(policy);
    let mut tracer = NgramTracer::new(config);
    for step in &steps {
        tracer.step(step);
        assert_eq!(tracer.window().len(), order - 1);
    }

    // Segment count only holds for delimiter-free opcodes
    if steps.iter().all(|s| !s.op.contains(KEY_DELIMITER)) {
        for (key, _) in tracer.on_result().iter() {
            assert_eq!(split_key(key).len(), order);
        }
    }
});
