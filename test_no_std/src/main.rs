//! Building this module successfully guarantees that the bilinear sampler is no-std compatible

#![no_std]
#![no_main]

use core::panic::PanicInfo;

use gridsample::bilinear::{interpn, Bilinear};

#[panic_handler]
fn panic(_info: &PanicInfo) -> ! {
    // We can't print, so there's not much to do here
    loop {}
}

#[no_mangle]
pub fn _start() -> ! {
    // Two channels of a 2x2 field
    let dims = [2, 2, 2];
    let z = [0.0_f64, 0.0, 0.0, 10.0, 1.0, 1.0, 1.0, 1.0];

    let mut out = [0.0; 2];

    let interpolator = Bilinear::new(0.5_f64, 0.5).unwrap();
    interpolator.interp(&dims, &z, &mut out).unwrap();
    interpolator.interp_one(&[2, 2], &z[..4]).unwrap();
    interpn(0.25, 0.75, &dims, &z, &mut out).unwrap();

    loop {} // We don't actually run this, just compile it
}
