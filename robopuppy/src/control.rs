use defmt::{debug, info, warn};
use rtic::Mutex;
use rtic_monotonics::systick::prelude::*;

use robopuppy_common::Legs;

use crate::Mono;

/// Joint update period.
pub const CONTROL_PERIOD_MS: u32 = 20;

/// Ticks every joint toward its target on a fixed cadence.
///
/// Targets are written into the shared `legs` by whatever plans the motion;
/// this loop only advances them and refreshes the servos.
pub async fn control_loop(mut cx: crate::app::control_task::Context<'_>) {
    info!("control loop started, {} ms period", CONTROL_PERIOD_MS);
    let mut settled = false;
    let mut faults = 0;

    loop {
        let now = Mono::now();

        let bus = &mut *cx.local.bus;
        let reached = cx.shared.legs.lock(|legs: &mut Legs| {
            let reached = legs.advance_all(bus);
            if reached && !settled {
                debug!("all joints on target");
                for (id, servo) in legs.iter() {
                    debug!(
                        "  leg {} {} ch {}: {} deg (trim {})",
                        id.leg,
                        id.kind,
                        servo.channel(),
                        servo.current_angle(),
                        servo.config().trim
                    );
                }
            }
            reached
        });
        settled = reached;

        if bus.faults() != faults {
            warn!(
                "servo bus faults: {} (last {})",
                bus.faults(),
                bus.last_fault()
            );
            faults = bus.faults();
        }

        Mono::delay_until(now + CONTROL_PERIOD_MS.millis()).await;
    }
}
