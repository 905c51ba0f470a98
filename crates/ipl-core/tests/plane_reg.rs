//! Plane container regression test
//!
//! Exercises construction, sharing, sample access and comparison.
//!
//! Run with:
//! ```
//! cargo test -p ipl-core --test plane_reg
//! ```

use ipl_core::{BACKGROUND, Error, FOREGROUND, Plane, PlaneMut};
use ipl_test::{RegParams, checker_plane, plane_from_pattern};

#[test]
fn plane_reg() {
    let mut rp = RegParams::new("plane");

    // Construction
    eprintln!("  Testing construction");
    let empty = Plane::new(13, 7).unwrap();
    rp.compare_values(0.0, empty.count_foreground() as f64, 0.0);
    rp.check(matches!(
        Plane::new(0, 7),
        Err(Error::InvalidDimension { width: 0, height: 7 })
    ));
    rp.check(matches!(
        Plane::from_samples(2, 2, vec![0, 1, 2, 0]),
        Err(Error::InvalidSample(2))
    ));
    rp.check(matches!(
        Plane::from_samples(2, 2, vec![0, 1, 1]),
        Err(Error::DataLength { expected: 4, actual: 3 })
    ));

    let thresholded = Plane::from_threshold(3, 1, &[0.1, 0.5, 0.9], 0.5).unwrap();
    rp.compare_strings(thresholded.data(), &[BACKGROUND, FOREGROUND, FOREGROUND]);

    // Sharing and copy-on-write
    eprintln!("  Testing sharing");
    let checker = checker_plane(16, 16, 4);
    let shared = checker.clone();
    rp.compare_values(2.0, checker.ref_count() as f64, 0.0);
    let mut edited = shared.to_mut();
    edited.set(0, 0, BACKGROUND).unwrap();
    edited.set(4, 0, FOREGROUND).unwrap();
    let edited: Plane = edited.into();
    rp.compare_values(2.0, checker.count_differences(&edited).unwrap() as f64, 0.0);
    rp.check(checker.get(0, 0) == Some(FOREGROUND));

    let unique = checker_plane(4, 4, 1);
    rp.check(unique.try_into_mut().is_ok());

    // Access
    eprintln!("  Testing access");
    let mut pm = PlaneMut::new(3, 2).unwrap();
    rp.check(matches!(
        pm.set(3, 0, FOREGROUND),
        Err(Error::IndexOutOfBounds { x: 3, y: 0, .. })
    ));
    rp.check(matches!(pm.set(0, 0, 7), Err(Error::InvalidSample(7))));
    pm.fill(FOREGROUND).unwrap();
    rp.compare_values(6.0, pm.count_foreground() as f64, 0.0);

    let pattern = plane_from_pattern(
        "
        #.#
        .#.
        ",
    )
    .unwrap();
    pm.copy_from(&pattern).unwrap();
    rp.compare_planes(&pattern, &Plane::from(pm));

    // Comparison
    eprintln!("  Testing comparison");
    let other = Plane::new(3, 3).unwrap();
    rp.check(!pattern.sizes_equal(&other));
    rp.check(pattern.count_differences(&other).is_none());
    rp.check(pattern.equals(&pattern.deep_clone()));

    assert!(rp.cleanup(), "plane regression test failed");
}
