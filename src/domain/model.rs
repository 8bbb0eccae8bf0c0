use serde::Serialize;

use crate::domain::vocabulary::{
    CAREER_LUCKY, CAREER_UNLUCKY, HEALTH_LUCKY, HEALTH_UNLUCKY, RELATIONSHIP_LUCKY,
    RELATIONSHIP_UNLUCKY, WEALTH_LUCKY, WEALTH_UNLUCKY,
};

/// Stem, branch, deity, door, star and luck of one palace.
pub type PalaceSymbols = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    bool,
);

/// One of the nine grid positions and its assigned symbols.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Palace {
    pub position: u8,
    pub name: &'static str,
    pub direction: &'static str,
    pub heavenly_stem: &'static str,
    pub earthly_branch: &'static str,
    pub deity: &'static str,
    pub door: &'static str,
    pub star: &'static str,
    pub is_lucky: bool,
}

impl Palace {
    /// Symbol content only, ignoring position, name and direction.
    pub fn symbols(&self) -> PalaceSymbols {
        (
            self.heavenly_stem,
            self.earthly_branch,
            self.deity,
            self.door,
            self.star,
            self.is_lucky,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plate {
    /// YYYY-MM-DD
    pub date: String,
    /// HH:MM, 24h
    pub time: String,
    pub palaces: Vec<Palace>,
}

impl Plate {
    pub fn palace(&self, position: u8) -> Option<&Palace> {
        self.palaces.iter().find(|p| p.position == position)
    }

    pub fn lucky_palace_names(&self) -> Vec<&'static str> {
        self.palaces
            .iter()
            .filter(|p| p.is_lucky)
            .map(|p| p.name)
            .collect()
    }

    pub fn unlucky_palace_names(&self) -> Vec<&'static str> {
        self.palaces
            .iter()
            .filter(|p| !p.is_lucky)
            .map(|p| p.name)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    East,
    South,
    West,
    North,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::North,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Direction::East => "东",
            Direction::South => "南",
            Direction::West => "西",
            Direction::North => "北",
        }
    }

    /// Grid region the direction is bound to.
    pub fn palace(self) -> &'static str {
        match self {
            Direction::East => "震宫",
            Direction::South => "离宫",
            Direction::West => "兑宫",
            Direction::North => "坎宫",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectionFortune {
    pub direction: Direction,
    pub name: &'static str,
    pub palace: &'static str,
    pub is_lucky: bool,
    pub score: u32,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeFortune {
    pub hour: String,
    pub is_lucky: bool,
    pub score: u32,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatterCategory {
    Career,
    Wealth,
    Relationship,
    Health,
}

impl MatterCategory {
    pub const ALL: [MatterCategory; 4] = [
        MatterCategory::Career,
        MatterCategory::Wealth,
        MatterCategory::Relationship,
        MatterCategory::Health,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MatterCategory::Career => "事业",
            MatterCategory::Wealth => "财运",
            MatterCategory::Relationship => "感情",
            MatterCategory::Health => "健康",
        }
    }

    /// Description pool matching the polarity of the fortune.
    pub fn descriptions(self, is_lucky: bool) -> &'static [&'static str; 3] {
        match (self, is_lucky) {
            (MatterCategory::Career, true) => &CAREER_LUCKY,
            (MatterCategory::Career, false) => &CAREER_UNLUCKY,
            (MatterCategory::Wealth, true) => &WEALTH_LUCKY,
            (MatterCategory::Wealth, false) => &WEALTH_UNLUCKY,
            (MatterCategory::Relationship, true) => &RELATIONSHIP_LUCKY,
            (MatterCategory::Relationship, false) => &RELATIONSHIP_UNLUCKY,
            (MatterCategory::Health, true) => &HEALTH_LUCKY,
            (MatterCategory::Health, false) => &HEALTH_UNLUCKY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatterFortune {
    pub category: MatterCategory,
    pub name: &'static str,
    pub is_lucky: bool,
    pub score: u32,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FortuneJudgment {
    pub directions: Vec<DirectionFortune>,
    pub time: TimeFortune,
    pub matters: Vec<MatterFortune>,
    pub overall_score: u32,
    pub overall_description: &'static str,
}

impl FortuneJudgment {
    pub fn lucky_directions(&self) -> impl Iterator<Item = &DirectionFortune> {
        self.directions.iter().filter(|d| d.is_lucky)
    }

    pub fn score_tier(&self) -> ScoreTier {
        ScoreTier::from_score(self.overall_score)
    }
}

/// Display grade of a single fortune entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LuckLevel {
    GreatFortune,
    Fortune,
    MinorFortune,
    MinorMisfortune,
    Misfortune,
    GreatMisfortune,
}

impl LuckLevel {
    pub fn grade(is_lucky: bool, score: u32) -> Self {
        if is_lucky {
            match score {
                80.. => LuckLevel::GreatFortune,
                60..=79 => LuckLevel::Fortune,
                _ => LuckLevel::MinorFortune,
            }
        } else {
            match score {
                0..=20 => LuckLevel::GreatMisfortune,
                21..=40 => LuckLevel::Misfortune,
                _ => LuckLevel::MinorMisfortune,
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LuckLevel::GreatFortune => "大吉",
            LuckLevel::Fortune => "吉",
            LuckLevel::MinorFortune => "小吉",
            LuckLevel::MinorMisfortune => "小凶",
            LuckLevel::Misfortune => "凶",
            LuckLevel::GreatMisfortune => "大凶",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreTier {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreTier {
    pub fn from_score(score: u32) -> Self {
        match score {
            80.. => ScoreTier::Excellent,
            60..=79 => ScoreTier::Good,
            40..=59 => ScoreTier::Fair,
            _ => ScoreTier::Poor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpretationSource {
    Model,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interpretation {
    pub text: String,
    pub source: InterpretationSource,
}

impl Interpretation {
    pub fn is_fallback(&self) -> bool {
        self.source == InterpretationSource::Fallback
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DivinationOutcome {
    pub question: String,
    pub plate: Plate,
    pub judgment: FortuneJudgment,
    pub interpretation: Interpretation,
}
