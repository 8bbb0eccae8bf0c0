use chrono::{Datelike, NaiveDateTime};

use crate::domain::model::{Palace, Plate};
use crate::domain::vocabulary::{DEITIES, DOORS, EARTHLY_BRANCHES, HEAVENLY_STEMS, PALACES, STARS};

/// Deterministic draw in `[min, max]` keyed only by `seed`.
///
/// Low entropy on purpose: every call with the same seed returns the same
/// fraction, so all fields of one palace are scaled from a single value.
pub fn seeded_index(seed: u32, min: usize, max: usize) -> usize {
    let x = f64::from(seed).sin() * 10000.0;
    let frac = x - x.floor();
    (frac * (max - min + 1) as f64).floor() as usize + min
}

/// Build the nine-palace plate for `time`.
///
/// The seed of each palace is `position + day-of-month`; hour and minute only
/// affect the display strings. Palaces whose seeds coincide (across days, e.g.
/// position 2 on the 14th and position 1 on the 15th) carry identical symbols.
pub fn generate_plate(time: &NaiveDateTime) -> Plate {
    let day = time.day();

    let palaces = PALACES
        .iter()
        .map(|info| {
            let seed = u32::from(info.position) + day;
            Palace {
                position: info.position,
                name: info.name,
                direction: info.direction,
                heavenly_stem: HEAVENLY_STEMS[seeded_index(seed, 0, HEAVENLY_STEMS.len() - 1)],
                earthly_branch: EARTHLY_BRANCHES
                    [seeded_index(seed, 0, EARTHLY_BRANCHES.len() - 1)],
                deity: DEITIES[seeded_index(seed, 0, DEITIES.len() - 1)],
                door: DOORS[seeded_index(seed, 0, DOORS.len() - 1)],
                star: STARS[seeded_index(seed, 0, STARS.len() - 1)],
                is_lucky: seeded_index(seed, 0, 10) > 4,
            }
        })
        .collect();

    let plate = Plate {
        date: time.format("%Y-%m-%d").to_string(),
        time: time.format("%H:%M").to_string(),
        palaces,
    };
    tracing::debug!(
        "Generated plate for {} {} ({} lucky palaces)",
        plate.date,
        plate.time,
        plate.lucky_palace_names().len()
    );
    plate
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_plate_has_nine_ordered_palaces() {
        let plate = generate_plate(&at(2024, 3, 15, 9, 30));

        assert_eq!(plate.palaces.len(), 9);
        let positions: Vec<u8> = plate.palaces.iter().map(|p| p.position).collect();
        assert_eq!(positions, (1..=9).collect::<Vec<u8>>());

        let center = plate.palace(5).unwrap();
        assert_eq!(center.name, "中");
        assert_eq!(center.direction, "中");
    }

    #[test]
    fn test_display_strings() {
        let plate = generate_plate(&at(2024, 3, 15, 9, 30));
        assert_eq!(plate.date, "2024-03-15");
        assert_eq!(plate.time, "09:30");
    }

    #[test]
    fn test_symbols_come_from_vocabularies() {
        for day in 1..=31 {
            let plate = generate_plate(&at(2024, 1, day, 12, 0));
            for palace in &plate.palaces {
                assert!(HEAVENLY_STEMS.contains(&palace.heavenly_stem));
                assert!(EARTHLY_BRANCHES.contains(&palace.earthly_branch));
                assert!(DEITIES.contains(&palace.deity));
                assert!(DOORS.contains(&palace.door));
                assert!(STARS.contains(&palace.star));
            }
        }
    }

    #[test]
    fn test_known_plate_for_march_fifteenth() {
        let plate = generate_plate(&at(2024, 3, 15, 9, 30));

        let kan = plate.palace(1).unwrap();
        assert_eq!(
            kan.symbols(),
            ("癸", "亥", "九天", "开门", "天英星", true)
        );

        let kun = plate.palace(2).unwrap();
        assert_eq!(kun.symbols(), ("甲", "子", "值符", "休门", "天蓬星", false));

        assert_eq!(plate.lucky_palace_names(), vec!["坎", "巽", "乾", "兑", "艮"]);
        assert_eq!(plate.unlucky_palace_names(), vec!["坤", "震", "中", "离"]);
    }

    #[test]
    fn test_same_day_of_month_gives_same_symbols() {
        let morning = generate_plate(&at(2024, 3, 15, 9, 30));
        let other_month = generate_plate(&at(2023, 11, 15, 23, 5));

        for (a, b) in morning.palaces.iter().zip(other_month.palaces.iter()) {
            assert_eq!(a, b);
        }
        assert_ne!(morning.time, other_month.time);
    }

    #[test]
    fn test_seed_collision_across_days() {
        // position p on day d shares its seed with position p+1 on day d-1
        let fifteenth = generate_plate(&at(2024, 3, 15, 9, 30));
        let fourteenth = generate_plate(&at(2024, 3, 14, 9, 30));

        for position in 1..=8u8 {
            let a = fifteenth.palace(position).unwrap();
            let b = fourteenth.palace(position + 1).unwrap();
            assert_eq!(a.symbols(), b.symbols());
        }
    }

    #[test]
    fn test_seeded_index_stays_in_range() {
        for seed in 0..500 {
            let idx = seeded_index(seed, 3, 7);
            assert!((3..=7).contains(&idx));
        }
    }
}
