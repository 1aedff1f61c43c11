#![deny(unsafe_code)]
#![no_main]
#![no_std]

use defmt::info;
use defmt_rtt as _;
use panic_probe as _;
use robopuppy::err::log::{err_os_h, log_err, RticErr};
use robopuppy::pwm::pca9685::{ServoBus, PCA_9685_ADDR};
use robopuppy_common::legs::default_configs;
use robopuppy_common::{JointId, JointKind, Legs, Step};
use rtic_monotonics::systick::prelude::*;
systick_monotonic!(Mono, 1000);
use stm32f4xx_hal::{i2c::I2c1, prelude::*};

const TICK_MS: u32 = 20;
const SWEEP_DEG: f32 = 45.0;

#[rtic::app(device = stm32f4xx_hal::pac, peripherals = true, dispatchers = [USART1])]
mod app {

    use super::*;

    #[shared]
    struct Shared {}

    #[local]
    struct Local {
        bus: ServoBus<I2c1>,
        legs: Legs,
    }

    #[init]
    fn init(cx: init::Context) -> (Shared, Local) {
        let dp = cx.device;
        let rcc = dp.RCC.constrain();
        let hse = 12.MHz();
        let sysclk = 64.MHz();
        let clocks = rcc.cfgr.use_hse(hse).sysclk(sysclk).freeze();

        Mono::start(cx.core.SYST, sysclk.to_Hz());

        info!("leg sweep");
        let gpiob = dp.GPIOB.split();
        let gpioc = dp.GPIOC.split();

        let i2c1_scl = gpiob.pb8.into_alternate_open_drain();
        let i2c1_sda = gpiob.pb9.into_alternate_open_drain();
        let i2c1 = I2c1::new(dp.I2C1, (i2c1_scl, i2c1_sda), 400.kHz(), &clocks);

        let bus = match ServoBus::new(i2c1, PCA_9685_ADDR) {
            Ok(bus) => bus,
            Err(e) => {
                log_err(e);
                panic!();
            }
        };

        info!("pwm enable pin");
        let mut servo_en = gpioc.pc3.into_push_pull_output();
        servo_en.set_low();

        let legs = match Legs::new(default_configs()) {
            Ok(legs) => legs,
            Err(e) => {
                defmt::error!("joint config: {}", e);
                panic!();
            }
        };

        if sweep_task::spawn().is_err() {
            log_err(err_os_h(RticErr::SpawnFail));
            panic!();
        }

        (Shared {}, Local { bus, legs })
    }

    #[task(local = [bus, legs])]
    async fn sweep_task(cx: sweep_task::Context) {
        let hip = JointId::new(0, JointKind::Hip);
        let knee = JointId::new(0, JointKind::Knee);
        let moves = [
            (Step::new(SWEEP_DEG, 1.5), Step::new(-SWEEP_DEG, 3.0)),
            (Step::new(-SWEEP_DEG, 1.5), Step::new(SWEEP_DEG, 3.0)),
            (Step::new(0.0, 0.5), Step::new(0.0, 0.5)),
        ];

        loop {
            for (hip_step, knee_step) in moves {
                for (joint, step) in [(hip, hip_step), (knee, knee_step)] {
                    if let Err(e) = cx.local.legs.move_joint(joint, step) {
                        defmt::warn!("move leg {} {} rejected: {}", joint.leg, joint.kind, e);
                    }
                }

                let mut ticks = 0u32;
                loop {
                    let now = Mono::now();
                    ticks += 1;
                    if cx.local.legs.advance_all(cx.local.bus) {
                        break;
                    }
                    Mono::delay_until(now + TICK_MS.millis()).await;
                }
                defmt::debug!("hip {} knee {} in {} ticks", hip_step.pos, knee_step.pos, ticks);
                Mono::delay(500.millis()).await;
            }
        }
    }
}
