use crate::domain::model::{DivinationOutcome, FortuneJudgment, LuckLevel, Plate};
use crate::utils::error::Result;

/// Lo Shu arrangement with south on top: rows of palace positions.
pub const GRID_LAYOUT: [[u8; 3]; 3] = [[4, 9, 2], [3, 5, 7], [8, 1, 6]];

/// Terminal columns taken by `s`; non-ASCII (CJK) characters count double.
fn display_width(s: &str) -> usize {
    s.chars().map(|c| if c.is_ascii() { 1 } else { 2 }).sum()
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(s));
    format!("{}{}", s, " ".repeat(fill))
}

fn palace_lines(plate: &Plate, position: u8) -> Vec<String> {
    match plate.palace(position) {
        Some(p) => vec![
            format!("{}宫 ({})", p.name, p.direction),
            format!("天干:{} 地支:{}", p.heavenly_stem, p.earthly_branch),
            format!("神:{} 门:{}", p.deity, p.door),
            format!("星:{}", p.star),
            if p.position == 5 {
                format!("[{}] *", if p.is_lucky { "吉" } else { "凶" })
            } else {
                format!("[{}]", if p.is_lucky { "吉" } else { "凶" })
            },
        ],
        None => Vec::new(),
    }
}

pub fn render_plate(plate: &Plate) -> String {
    let mut out = format!("排盘时间: {} {}\n", plate.date, plate.time);

    let cells: Vec<Vec<Vec<String>>> = GRID_LAYOUT
        .iter()
        .map(|row| row.iter().map(|&pos| palace_lines(plate, pos)).collect())
        .collect();
    let width = cells
        .iter()
        .flatten()
        .flatten()
        .map(|line| display_width(line))
        .max()
        .unwrap_or(0);
    let border = format!("+{}+", vec!["-".repeat(width + 2); 3].join("+"));

    out.push_str(&format!("{}南\n", " ".repeat(border.len() / 2)));
    out.push_str(&border);
    out.push('\n');
    for row in &cells {
        let height = row.iter().map(Vec::len).max().unwrap_or(0);
        for i in 0..height {
            let line: Vec<String> = row
                .iter()
                .map(|cell| pad(cell.get(i).map(String::as_str).unwrap_or(""), width))
                .collect();
            out.push_str(&format!("| {} |\n", line.join(" | ")));
        }
        out.push_str(&border);
        out.push('\n');
    }
    out.push_str(&format!("{}北\n", " ".repeat(border.len() / 2)));
    out
}

pub fn render_judgment(judgment: &FortuneJudgment) -> String {
    let mut out = String::from("综合判断\n");
    out.push_str(&format!(
        "  整体吉凶评分: {} ({:?})\n  \"{}\"\n",
        judgment.overall_score,
        judgment.score_tier(),
        judgment.overall_description
    ));

    out.push_str("方位吉凶\n");
    for d in &judgment.directions {
        out.push_str(&format!(
            "  {}方 ({}) [{}] {}\n",
            d.name,
            d.palace,
            LuckLevel::grade(d.is_lucky, d.score).label(),
            d.description
        ));
    }

    out.push_str("时辰吉凶\n");
    out.push_str(&format!(
        "  {}时 [{}] {}\n",
        judgment.time.hour,
        LuckLevel::grade(judgment.time.is_lucky, judgment.time.score).label(),
        judgment.time.description
    ));

    out.push_str("事项吉凶\n");
    for m in &judgment.matters {
        out.push_str(&format!(
            "  {} [{}] {}\n",
            m.name,
            LuckLevel::grade(m.is_lucky, m.score).label(),
            m.description
        ));
    }
    out
}

pub fn render_text(outcome: &DivinationOutcome) -> String {
    let heading = if outcome.interpretation.is_fallback() {
        "解读分析 (本地)"
    } else {
        "解读分析"
    };
    format!(
        "问题: {}\n\n{}\n{}\n{}\n{}\n",
        outcome.question,
        render_plate(&outcome.plate),
        render_judgment(&outcome.judgment),
        heading,
        outcome.interpretation.text
    )
}

pub fn render_json(outcome: &DivinationOutcome) -> Result<String> {
    Ok(serde_json::to_string_pretty(outcome)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::random::RngSource;
    use crate::core::interpretation::fallback_text;
    use crate::core::judgment::judge;
    use crate::core::plate::generate_plate;
    use crate::domain::model::{Interpretation, InterpretationSource};
    use chrono::NaiveDate;

    fn outcome() -> DivinationOutcome {
        let time = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let plate = generate_plate(&time);
        let judgment = judge(&plate, &mut RngSource::seeded(9));
        let text = fallback_text(&plate, &judgment, "q");
        DivinationOutcome {
            question: "q".to_string(),
            plate,
            judgment,
            interpretation: Interpretation {
                text,
                source: InterpretationSource::Fallback,
            },
        }
    }

    #[test]
    fn test_grid_covers_every_position_once() {
        let mut positions: Vec<u8> = GRID_LAYOUT.iter().flatten().copied().collect();
        positions.sort();
        assert_eq!(positions, (1..=9).collect::<Vec<u8>>());
        assert_eq!(GRID_LAYOUT[1][1], 5);
    }

    #[test]
    fn test_plate_rendering_puts_south_on_top() {
        let rendered = render_plate(&outcome().plate);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "排盘时间: 2024-03-15 09:30");
        assert!(lines[3].contains("巽宫 (东南)"));
        assert!(lines[3].contains("离宫 (南)"));
        assert!(lines[3].find("巽宫").unwrap() < lines[3].find("离宫").unwrap());
        assert!(rendered.contains("中宫 (中)"));
        assert!(rendered.trim_end().ends_with('北'));
    }

    #[test]
    fn test_text_report_sections() {
        let rendered = render_text(&outcome());
        for section in ["综合判断", "方位吉凶", "时辰吉凶", "事项吉凶", "解读分析 (本地)"] {
            assert!(rendered.contains(section), "missing {}", section);
        }
        assert!(rendered.contains("09时"));
    }

    #[test]
    fn test_json_uses_camel_case() {
        let json: serde_json::Value = serde_json::from_str(&render_json(&outcome()).unwrap()).unwrap();

        assert_eq!(json["plate"]["date"], "2024-03-15");
        assert_eq!(json["plate"]["palaces"][0]["heavenlyStem"], "癸");
        assert_eq!(json["plate"]["palaces"][0]["isLucky"], true);
        assert!(json["judgment"]["overallScore"].is_u64());
        assert_eq!(json["judgment"]["directions"][0]["direction"], "east");
        assert_eq!(json["judgment"]["matters"][0]["name"], "事业");
        assert_eq!(json["interpretation"]["source"], "fallback");
    }
}
