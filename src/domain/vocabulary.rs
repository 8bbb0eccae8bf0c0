//! Fixed symbol tables and canned sentence pools.

/// 天干
pub const HEAVENLY_STEMS: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];

/// 地支
pub const EARTHLY_BRANCHES: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

/// 神盤
pub const DEITIES: [&str; 8] = ["值符", "螣蛇", "太阴", "六合", "白虎", "玄武", "九地", "九天"];

/// 門盤
pub const DOORS: [&str; 8] = ["休门", "生门", "伤门", "杜门", "景门", "死门", "惊门", "开门"];

/// 星盤
pub const STARS: [&str; 9] = [
    "天蓬星", "天芮星", "天冲星", "天辅星", "天禽星", "天心星", "天柱星", "天任星", "天英星",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PalaceInfo {
    pub position: u8,
    pub name: &'static str,
    pub direction: &'static str,
}

/// 宮位名稱和方位, ordered by position.
pub const PALACES: [PalaceInfo; 9] = [
    PalaceInfo { position: 1, name: "坎", direction: "北" },
    PalaceInfo { position: 2, name: "坤", direction: "西南" },
    PalaceInfo { position: 3, name: "震", direction: "东" },
    PalaceInfo { position: 4, name: "巽", direction: "东南" },
    PalaceInfo { position: 5, name: "中", direction: "中" },
    PalaceInfo { position: 6, name: "乾", direction: "西北" },
    PalaceInfo { position: 7, name: "兑", direction: "西" },
    PalaceInfo { position: 8, name: "艮", direction: "东北" },
    PalaceInfo { position: 9, name: "离", direction: "南" },
];

pub const DIRECTION_DESCRIPTIONS: [&str; 6] = [
    "此方位有利发展，可积极进取",
    "此方位运势平稳，宜守不宜攻",
    "此方位有阻碍，需谨慎行事",
    "此方位机遇与挑战并存，需把握时机",
    "此方位有贵人相助，可寻求合作",
    "此方位需防小人，注意人际关系",
];

pub const TIME_DESCRIPTIONS: [&str; 6] = [
    "此时辰气场稳定，适合决策和行动",
    "此时辰运势上扬，有利于开展新计划",
    "此时辰宜静不宜动，适合思考和规划",
    "此时辰有变动之象，需灵活应对",
    "此时辰贵人运旺，可寻求他人帮助",
    "此时辰需防意外，行事谨慎为上",
];

pub const CAREER_LUCKY: [&str; 3] = [
    "事业发展顺利，有晋升机会",
    "工作得心应手，易获认可",
    "事业有新机遇，可积极把握",
];
pub const CAREER_UNLUCKY: [&str; 3] = [
    "事业遇瓶颈，需调整策略",
    "工作压力大，注意劳逸结合",
    "事业发展缓慢，需耐心等待",
];

pub const WEALTH_LUCKY: [&str; 3] = [
    "财运亨通，有意外收获",
    "投资有望获利，可适当投入",
    "正财稳定，偏财可期",
];
pub const WEALTH_UNLUCKY: [&str; 3] = [
    "财运不佳，需谨慎理财",
    "易有破财之虞，注意节约",
    "财务压力大，需合理规划",
];

pub const RELATIONSHIP_LUCKY: [&str; 3] = [
    "感情和睦，关系升温",
    "单身者有良缘，可多社交",
    "感情稳定，有望更进一步",
];
pub const RELATIONSHIP_UNLUCKY: [&str; 3] = [
    "感情有波折，需多沟通",
    "情绪波动大，注意控制脾气",
    "感情平淡，需用心经营",
];

pub const HEALTH_LUCKY: [&str; 3] = [
    "身体健康，精力充沛",
    "体质转强，适合锻炼",
    "身心舒畅，压力减轻",
];
pub const HEALTH_UNLUCKY: [&str; 3] = [
    "需注意健康，避免劳累",
    "作息不规律，易影响健康",
    "情绪紧张，需放松心情",
];

/// Ordered from best to worst; indexed by score bracket.
pub const OVERALL_DESCRIPTIONS: [&str; 5] = [
    "整体运势良好，机遇与挑战并存，积极把握可获成功",
    "运势平稳上升，稳步前进可达成目标",
    "运势有起伏，需审时度势，灵活应对变化",
    "整体运势一般，宜守不宜攻，积蓄力量等待时机",
    "运势面临挑战，需谨慎行事，避免冒险",
];
