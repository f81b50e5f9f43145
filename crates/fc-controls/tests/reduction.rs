//! PID with zero derivative gain behaves as PI; PI with zero integral gain
//! behaves as P, for any error history.

use fc_controls::{ControlBlock, Controller, PIController, PIDController, Proportional};
use proptest::prelude::*;

proptest! {
    #[test]
    fn pid_without_kd_matches_pi(
        kp in -5.0_f64..5.0,
        ki in -1.0_f64..1.0,
        dt in 0.01_f64..2.0,
        errors in prop::collection::vec(-100.0_f64..100.0, 1..100),
    ) {
        let mut pid = ControlBlock::new(PIDController::new(kp, ki, 0.0).unwrap());
        let mut pi = ControlBlock::new(PIController::new(kp, ki).unwrap());
        for e in errors {
            let a = pid.step(e, dt).unwrap();
            let b = pi.step(e, dt).unwrap();
            prop_assert_eq!(a, b);
        }
    }

    #[test]
    fn pi_without_ki_matches_p(
        kp in -5.0_f64..5.0,
        dt in 0.01_f64..2.0,
        errors in prop::collection::vec(-100.0_f64..100.0, 1..100),
    ) {
        let mut pi = ControlBlock::new(PIController::new(kp, 0.0).unwrap());
        let mut p = ControlBlock::new(Proportional::new(kp).unwrap());
        for e in errors {
            let a = pi.step(e, dt).unwrap();
            let b = p.step(e, dt).unwrap();
            prop_assert!((a - b).abs() <= 1e-12 * b.abs().max(1.0));
        }
    }

    #[test]
    fn integral_is_sum_of_weighted_errors(
        dt in 0.01_f64..2.0,
        errors in prop::collection::vec(-10.0_f64..10.0, 1..50),
    ) {
        let mut pi = ControlBlock::new(PIController::new(0.0, 1.0).unwrap());
        let mut expected = 0.0;
        for e in &errors {
            expected += dt * e;
            pi.step(*e, dt).unwrap();
        }
        prop_assert!((pi.state().integral - expected).abs() < 1e-9);
    }
}

#[test]
fn boxed_controllers_share_one_interface() {
    let mut controllers: Vec<Box<dyn Controller>> = vec![
        Box::new(ControlBlock::new(Proportional::new(2.0).unwrap())),
        Box::new(ControlBlock::new(PIController::new(2.0, 0.0).unwrap())),
        Box::new(ControlBlock::new(PIDController::new(2.0, 0.0, 0.0).unwrap())),
    ];
    for c in controllers.iter_mut() {
        assert_eq!(c.step(1.5, 1.0).unwrap(), 3.0);
    }
    assert_eq!(controllers[2].name(), "PID");
}
