use proptest::prelude::*;
use wallkit_core::constants::MIN_OPENING_LENGTH_PX;
use wallkit_core::{Opening, OpeningKind, Side};

proptest! {
    #[test]
    fn clamped_opening_fits_its_wall(
        wall in 1.0f64..500.0,
        offset in -100.0f64..600.0,
        length in -10.0f64..600.0,
    ) {
        let mut opening = Opening::new("1", "1", Side::Top, offset, length, OpeningKind::Door);
        opening.clamp_to_wall(wall);

        prop_assert!(opening.offset >= 0.0);
        prop_assert!(opening.length <= wall);
        prop_assert!(opening.offset + opening.length <= wall + 1e-9);
        prop_assert!(opening.length >= MIN_OPENING_LENGTH_PX.min(wall));
    }

    #[test]
    fn clamping_twice_changes_nothing(
        wall in 1.0f64..500.0,
        offset in -100.0f64..600.0,
        length in -10.0f64..600.0,
    ) {
        let mut opening = Opening::new("1", "1", Side::Left, offset, length, OpeningKind::window());
        opening.clamp_to_wall(wall);
        let once = opening.clone();
        opening.clamp_to_wall(wall);
        prop_assert_eq!(opening, once);
    }
}
