use crate::domain::model::{
    Direction, DirectionFortune, FortuneJudgment, MatterCategory, MatterFortune, Plate, TimeFortune,
};
use crate::domain::ports::RandomSource;
use crate::domain::vocabulary::{DIRECTION_DESCRIPTIONS, OVERALL_DESCRIPTIONS, TIME_DESCRIPTIONS};

pub const DIRECTION_SCORE_RANGE: (u32, u32) = (30, 85);
pub const TIME_SCORE_RANGE: (u32, u32) = (40, 80);
pub const MATTER_SCORE_RANGE: (u32, u32) = (35, 85);

const DIRECTION_LUCKY_ABOVE: u32 = 50;
const TIME_LUCKY_ABOVE: u32 = 55;
const MATTER_LUCKY_ABOVE: u32 = 50;

fn pick<R: RandomSource + ?Sized>(rng: &mut R, pool: &[&'static str]) -> &'static str {
    let idx = rng.uniform(0, (pool.len() - 1) as u32) as usize;
    // 防止注入的隨機源越界
    pool[idx.min(pool.len() - 1)]
}

/// Leading "HH" token of a "HH:MM" display time.
pub fn hour_of(time: &str) -> &str {
    time.split(':').next().unwrap_or(time)
}

/// `round(avg(directions) * 0.3 + time * 0.2 + avg(matters) * 0.5)`
pub fn overall_score(direction_scores: &[u32], time_score: u32, matter_scores: &[u32]) -> u32 {
    let avg = |scores: &[u32]| {
        if scores.is_empty() {
            0.0
        } else {
            scores.iter().map(|&s| f64::from(s)).sum::<f64>() / scores.len() as f64
        }
    };
    let weighted =
        avg(direction_scores) * 0.3 + f64::from(time_score) * 0.2 + avg(matter_scores) * 0.5;
    weighted.round() as u32
}

pub fn overall_description(score: u32) -> &'static str {
    let idx = match score {
        80.. => 0,
        65..=79 => 1,
        50..=64 => 2,
        35..=49 => 3,
        _ => 4,
    };
    OVERALL_DESCRIPTIONS[idx]
}

/// Score the plate's directions, hour and life matters.
///
/// Only the hour of `plate.time` is read; palace contents do not influence the
/// scores. Draws happen in a fixed order: each direction (score, description),
/// the time score, each matter (score, description), then the time description.
pub fn judge<R: RandomSource + ?Sized>(plate: &Plate, rng: &mut R) -> FortuneJudgment {
    let directions: Vec<DirectionFortune> = Direction::ALL
        .iter()
        .map(|&direction| {
            let score = rng.uniform(DIRECTION_SCORE_RANGE.0, DIRECTION_SCORE_RANGE.1);
            DirectionFortune {
                direction,
                name: direction.name(),
                palace: direction.palace(),
                is_lucky: score > DIRECTION_LUCKY_ABOVE,
                score,
                description: pick(rng, &DIRECTION_DESCRIPTIONS),
            }
        })
        .collect();

    let hour = hour_of(&plate.time).to_string();
    let time_score = rng.uniform(TIME_SCORE_RANGE.0, TIME_SCORE_RANGE.1);

    let matters: Vec<MatterFortune> = MatterCategory::ALL
        .iter()
        .map(|&category| {
            let score = rng.uniform(MATTER_SCORE_RANGE.0, MATTER_SCORE_RANGE.1);
            let is_lucky = score > MATTER_LUCKY_ABOVE;
            MatterFortune {
                category,
                name: category.name(),
                is_lucky,
                score,
                description: pick(rng, category.descriptions(is_lucky)),
            }
        })
        .collect();

    let direction_scores: Vec<u32> = directions.iter().map(|d| d.score).collect();
    let matter_scores: Vec<u32> = matters.iter().map(|m| m.score).collect();
    let overall = overall_score(&direction_scores, time_score, &matter_scores);

    let time = TimeFortune {
        hour,
        is_lucky: time_score > TIME_LUCKY_ABOVE,
        score: time_score,
        description: pick(rng, &TIME_DESCRIPTIONS),
    };

    tracing::debug!(
        "Judged plate {} {}: overall score {}, time {} ({})",
        plate.date,
        plate.time,
        overall,
        time.hour,
        time.score
    );

    FortuneJudgment {
        directions,
        time,
        matters,
        overall_score: overall,
        overall_description: overall_description(overall),
    }
}
