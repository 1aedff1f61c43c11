#![no_std]
#![no_main]

/// modules
mod control;

use robopuppy::err::log::{err_cfg_h, err_os_h, log_err, RticErr};
use robopuppy::pwm::pca9685::{ServoBus, PCA_9685_ADDR};
use robopuppy_common::legs::{default_configs, DEFAULT_SPEED_DEG};
use robopuppy_common::{Legs, Pose};

/// configuration
use defmt_rtt as _;
use panic_probe as _;

/// system
use rtic_monotonics::systick::prelude::*;
systick_monotonic!(Mono, 1000);

/// hal
use stm32f4xx_hal::i2c::I2c1;
use stm32f4xx_hal::prelude::*;

/// type
type Bus = ServoBus<I2c1>;

#[rtic::app(device = stm32f4xx_hal::pac, peripherals = true, dispatchers = [USART1])]
mod app {

    use super::*;

    #[shared]
    struct Shared {
        legs: Legs,
    }

    #[local]
    struct Local {
        bus: Bus,
    }

    #[init]
    fn init(cx: init::Context) -> (Shared, Local) {
        let dp = cx.device;
        let rcc = dp.RCC.constrain();
        let hse = 16.MHz();
        let sysclk = 64.MHz();
        let clocks = rcc.cfgr.use_hse(hse).sysclk(sysclk).freeze();

        let _syscfg = dp.SYSCFG.constrain();
        Mono::start(cx.core.SYST, sysclk.to_Hz());

        let gpiob = dp.GPIOB.split();
        let gpioc = dp.GPIOC.split();

        // PCA9685
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
        // PCA9685

        // active low output enable on the servo rail
        let mut servo_en = gpioc.pc3.into_push_pull_output();
        servo_en.set_low();

        let mut legs = match Legs::new(default_configs()) {
            Ok(legs) => legs,
            Err(e) => {
                defmt::error!("joint config: {}", e);
                log_err(err_cfg_h(e));
                panic!();
            }
        };
        legs.set_pose(&Pose::NEUTRAL, DEFAULT_SPEED_DEG);

        if control_task::spawn().is_err() {
            log_err(err_os_h(RticErr::SpawnFail));
            panic!();
        }

        defmt::info!("Setup completed.");
        (Shared { legs }, Local { bus })
    }

    #[task(shared = [legs], local = [bus])]
    async fn control_task(cx: control_task::Context) {
        control::control_loop(cx).await;
    }
}
