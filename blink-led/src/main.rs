#![no_std]
#![no_main]

use blink_core::{Blinker, Mmio, SpinDelay, config::DELAY_ITERATIONS};
use cortex_m_rt::entry;
use defmt_rtt as _;
use panic_halt as _;
use stm32f4xx_hal::{pac, prelude::*};

mod board;

#[entry]
fn main() -> ! {
    let dp = pac::Peripherals::take().unwrap();

    // Splitting the port turns its clock on. The pins themselves are driven
    // through raw register writes below.
    let _gpioa = dp.GPIOA.split();

    defmt::info!("blinking LD2 on PA{=u8}", board::LED.index());

    // SAFETY: the layout only ever addresses GPIOA's MODER and ODR, which
    // accept byte writes, and the HAL no longer touches them.
    let bus = unsafe { Mmio::new() };
    let blinker = Blinker::new(
        bus,
        SpinDelay::new(),
        board::GPIOA,
        board::LED,
        DELAY_ITERATIONS,
    );

    blinker.run()
}
