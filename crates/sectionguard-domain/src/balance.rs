//! Point-based balance scoring for section templates and design notation.
//!
//! Weapons cost by component template, utilities by slot size, auxiliary slots by
//! ship type. The point total places a design in a tier.

use crate::model::SectionTemplate;
use sectionguard_types::BalanceEntry;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    Common,
    Advanced,
    Pro,
    Ultra,
    Ultimate,
}

impl Tier {
    pub const ALL: [Tier; 5] = [
        Tier::Common,
        Tier::Advanced,
        Tier::Pro,
        Tier::Ultra,
        Tier::Ultimate,
    ];

    pub fn from_points(points: u32) -> Self {
        match points {
            0..=24 => Tier::Common,
            25..=32 => Tier::Advanced,
            33..=40 => Tier::Pro,
            41..=52 => Tier::Ultra,
            _ => Tier::Ultimate,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Common => "common",
            Tier::Advanced => "advanced",
            Tier::Pro => "pro",
            Tier::Ultra => "ultra",
            Tier::Ultimate => "ultimate",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
    }
}

/// Design notation codes and the component template each stands for.
/// Multi-letter codes come first so `PD` is not read as `P` + `D`.
const NOTATION_CODES: &[(&str, &str)] = &[
    ("PD", "point_defence_turret"),
    ("HB", "large_strike_craft"),
    ("S", "small_turret"),
    ("M", "medium_turret"),
    ("G", "medium_missile_turret"),
    ("L", "large_turret"),
    ("X", "invisible_extra_large_fixed"),
    ("T", "invisible_titanic_fixed"),
    ("W", "invisible_planet_killer_fixed"),
];

const UTILITY_CODES: &[&str] = &["AUX", "UL", "US"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BalanceTable {
    /// Component template to points.
    pub weapon_costs: BTreeMap<String, u32>,
    pub large_utility: u32,
    pub small_utility: u32,
    /// Ship type to the cost of one auxiliary slot.
    pub aux_costs: BTreeMap<String, u32>,
    pub default_aux: u32,
}

impl Default for BalanceTable {
    fn default() -> Self {
        let weapon_costs = [
            ("small_turret", 1),
            ("point_defence_turret", 1),
            ("medium_turret", 2),
            ("medium_missile_turret", 2),
            ("large_turret", 4),
            ("large_strike_craft", 4),
            ("invisible_extra_large_fixed", 8),
            ("invisible_titanic_fixed", 16),
            ("invisible_planet_killer_fixed", 0),
        ];
        let aux_costs = [
            ("corvette", 1),
            ("frigate", 1),
            ("destroyer", 2),
            ("cruiser", 4),
            ("battleship", 8),
            ("titan", 16),
            ("juggernaut", 16),
            ("colossus", 16),
            ("star_eater", 32),
        ];
        Self {
            weapon_costs: weapon_costs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            large_utility: 4,
            small_utility: 1,
            aux_costs: aux_costs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            default_aux: 4,
        }
    }
}

impl BalanceTable {
    pub fn aux_cost(&self, ship_type: &str) -> u32 {
        self.aux_costs
            .get(ship_type)
            .copied()
            .unwrap_or(self.default_aux)
    }

    fn utility_points(&self, ship_type: &str, large: u32, small: u32, aux: u32) -> u32 {
        large
            .saturating_mul(self.large_utility)
            .saturating_add(small.saturating_mul(self.small_utility))
            .saturating_add(aux.saturating_mul(self.aux_cost(ship_type)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("design notation is empty")]
    Empty,

    #[error("unexpected '{found}' at position {position} in design notation")]
    UnexpectedToken { position: usize, found: char },

    #[error("'{code}' at position {position} needs a count")]
    MissingCount { code: String, position: usize },

    #[error("count for '{code}' is too large")]
    CountOverflow { code: String },
}

/// A scored design notation such as `T2X1UL2`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DesignScore {
    pub notation: String,
    pub ship_type: String,
    /// Notation code to count, in code order.
    pub weapons: Vec<(String, u32)>,
    pub large_utility: u32,
    pub small_utility: u32,
    pub aux: u32,
    pub points: u32,
    pub tier: Tier,
}

/// Parse and score design notation for `ship_type`. Codes are case-insensitive and a
/// repeated code adds up.
pub fn score_notation(
    notation: &str,
    ship_type: &str,
    table: &BalanceTable,
) -> Result<DesignScore, NotationError> {
    let upper = notation.trim().to_ascii_uppercase();
    if upper.is_empty() {
        return Err(NotationError::Empty);
    }

    let mut counts: BTreeMap<&'static str, u32> = BTreeMap::new();
    let mut rest = upper.as_str();
    while !rest.is_empty() {
        let position = upper.len() - rest.len();
        let code = UTILITY_CODES
            .iter()
            .copied()
            .chain(NOTATION_CODES.iter().map(|(code, _)| *code))
            .find(|code| rest.starts_with(code))
            .ok_or_else(|| NotationError::UnexpectedToken {
                position,
                found: rest.chars().next().unwrap_or(' '),
            })?;
        rest = &rest[code.len()..];

        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return Err(NotationError::MissingCount {
                code: code.to_string(),
                position,
            });
        }
        let count: u32 = rest[..digits]
            .parse()
            .map_err(|_| NotationError::CountOverflow {
                code: code.to_string(),
            })?;
        rest = &rest[digits..];
        let total = counts.entry(code).or_default();
        *total = total.saturating_add(count);
    }

    let large_utility = counts.remove("UL").unwrap_or(0);
    let small_utility = counts.remove("US").unwrap_or(0);
    let aux = counts.remove("AUX").unwrap_or(0);

    let weapons: Vec<(String, u32)> = NOTATION_CODES
        .iter()
        .filter_map(|(code, _)| counts.get(code).map(|n| (code.to_string(), *n)))
        .collect();
    let weapon_points: u32 = NOTATION_CODES
        .iter()
        .filter_map(|(code, template)| {
            let n = counts.get(code)?;
            Some(n.saturating_mul(table.weapon_costs.get(*template).copied().unwrap_or(0)))
        })
        .fold(0u32, u32::saturating_add);
    let points = weapon_points
        .saturating_add(table.utility_points(ship_type, large_utility, small_utility, aux));

    Ok(DesignScore {
        notation: notation.trim().to_string(),
        ship_type: ship_type.to_string(),
        weapons,
        large_utility,
        small_utility,
        aux,
        points,
        tier: Tier::from_points(points),
    })
}

/// First `_`-separated token of the key that names a tier.
pub fn declared_tier(key: &str) -> Option<Tier> {
    key.split('_').find_map(Tier::parse)
}

/// `key` with its declared tier token swapped for `tier`, in the token's case.
/// `None` when the key declares no tier.
pub fn rename_tier(key: &str, tier: Tier) -> Option<String> {
    let tokens: Vec<&str> = key.split('_').collect();
    let index = tokens.iter().position(|t| Tier::parse(t).is_some())?;
    let name = if tokens[index].bytes().any(|b| b.is_ascii_lowercase()) {
        tier.as_str().to_string()
    } else {
        tier.as_str().to_ascii_uppercase()
    };
    let renamed: Vec<&str> = tokens
        .iter()
        .enumerate()
        .map(|(i, t)| if i == index { name.as_str() } else { *t })
        .collect();
    Some(renamed.join("_"))
}

pub fn score_template(template: &SectionTemplate, table: &BalanceTable) -> BalanceEntry {
    let mut unpriced = BTreeSet::new();
    let mut points = 0;
    for component in &template.component_slots {
        match table.weapon_costs.get(&component.template) {
            Some(cost) => points = cost.saturating_add(points),
            None => {
                unpriced.insert(component.template.clone());
            }
        }
    }
    let ship_type = template.ship_type.value.as_str();
    let utility = template.utility_slots;
    points = points.saturating_add(table.utility_points(
        ship_type,
        utility.large,
        utility.small,
        utility.aux,
    ));

    let tier = Tier::from_points(points);
    let declared = declared_tier(&template.key);
    BalanceEntry {
        template: template.key.clone(),
        path: template.path.clone(),
        line: template.line,
        ship_type: ship_type.to_string(),
        slot: template.slot.value.clone(),
        points,
        tier: tier.as_str().to_string(),
        declared_tier: declared.map(|t| t.as_str().to_string()),
        tier_mismatch: declared.is_some_and(|d| d != tier),
        unpriced_components: unpriced.into_iter().collect(),
    }
}

/// Score every template in (file, position) order.
pub fn analyze(templates: &[SectionTemplate], table: &BalanceTable) -> Vec<BalanceEntry> {
    crate::engine::ordered_templates(templates)
        .into_iter()
        .map(|t| score_template(t, table))
        .collect()
}
