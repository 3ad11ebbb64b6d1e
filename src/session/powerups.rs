//! Power-up catalog and active-effect bookkeeping.
//!
//! Power-ups are described by a static registry rather than behavior
//! captured in closures: pickup appends a tagged `ActiveEffect` record and
//! a fixed-interval sweep retires expired records. Everything an effect
//! changes is derived from the active list, so removal alone reverses it.

use rand::Rng;

/// The four power-up types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Halves the effective play-tick interval while active.
    TimeSlow,
    /// Instant +1 life, capped at the session maximum.
    ExtraLife,
    /// Score is computed with twice the current multiplier while active.
    DoubleMultiplier,
    /// Absorbs exactly one miss, then is spent.
    Shield,
}

/// Static definition of a power-up type.
#[derive(Debug, Clone)]
pub struct PowerUpDef {
    pub kind: PowerUpKind,
    pub name: &'static str,
    pub icon: &'static str,
    /// Spawn probability per play tick.
    pub probability: f64,
    /// How long the effect lasts once picked up. `None` for instant
    /// effects (ExtraLife) and use-limited ones (Shield).
    pub duration_ms: Option<u64>,
}

/// All power-up definitions. Registration order matters: the spawn roll
/// walks cumulative buckets in this order and falls back to the first
/// entry.
pub const POWER_UPS: &[PowerUpDef] = &[
    PowerUpDef {
        kind: PowerUpKind::TimeSlow,
        name: "Time Slow",
        icon: "⏳",
        probability: 0.05,
        duration_ms: Some(5_000),
    },
    PowerUpDef {
        kind: PowerUpKind::ExtraLife,
        name: "Extra Life",
        icon: "❤",
        probability: 0.03,
        duration_ms: None,
    },
    PowerUpDef {
        kind: PowerUpKind::DoubleMultiplier,
        name: "Double Multiplier",
        icon: "✦",
        probability: 0.04,
        duration_ms: Some(8_000),
    },
    PowerUpDef {
        kind: PowerUpKind::Shield,
        name: "Shield",
        icon: "🛡",
        probability: 0.03,
        duration_ms: None,
    },
];

/// Look up the static definition for a kind.
pub fn def_for(kind: PowerUpKind) -> &'static PowerUpDef {
    POWER_UPS
        .iter()
        .find(|d| d.kind == kind)
        .unwrap_or(&POWER_UPS[0])
}

/// One Bernoulli spawn trial. A single roll is matched against cumulative
/// probability buckets; a roll past every bucket means no spawn this tick.
pub fn roll_spawn(rng: &mut impl Rng) -> Option<PowerUpKind> {
    let roll: f64 = rng.gen();
    let total: f64 = POWER_UPS.iter().map(|d| d.probability).sum();
    if roll >= total {
        return None;
    }
    let mut cumulative = 0.0;
    for def in POWER_UPS {
        cumulative += def.probability;
        if roll < cumulative {
            return Some(def.kind);
        }
    }
    // Committed to a spawn but no bucket matched (floating-point edge).
    Some(POWER_UPS[0].kind)
}

/// A power-up sitting on the grid waiting to be tapped.
#[derive(Debug, Clone, Copy)]
pub struct PowerUpSpawn {
    pub kind: PowerUpKind,
    pub cell: usize,
}

/// A picked-up effect currently applied to the session.
#[derive(Debug, Clone, Copy)]
pub struct ActiveEffect {
    pub kind: PowerUpKind,
    /// When the effect expires. `None` means it ends by being consumed
    /// (Shield) rather than by time.
    pub ends_at_ms: Option<i64>,
}

/// Retire expired effects, returning the kinds that just ended. Safe to
/// call repeatedly with the same `now`; already-removed effects cannot
/// expire twice.
pub fn sweep_expired(effects: &mut Vec<ActiveEffect>, now_ms: i64) -> Vec<PowerUpKind> {
    let mut expired = Vec::new();
    effects.retain(|e| match e.ends_at_ms {
        Some(ends_at) if now_ms >= ends_at => {
            expired.push(e.kind);
            false
        }
        _ => true,
    });
    expired
}

/// Whether any effect of `kind` is currently active.
pub fn effect_active(effects: &[ActiveEffect], kind: PowerUpKind) -> bool {
    effects.iter().any(|e| e.kind == kind)
}

/// Remove one effect of `kind` (used when a shield absorbs a miss).
/// Returns true if one was present.
pub fn consume_effect(effects: &mut Vec<ActiveEffect>, kind: PowerUpKind) -> bool {
    if let Some(pos) = effects.iter().position(|e| e.kind == kind) {
        effects.remove(pos);
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_registry_probabilities_are_sane() {
        let total: f64 = POWER_UPS.iter().map(|d| d.probability).sum();
        assert!(total > 0.0 && total < 1.0);
        for def in POWER_UPS {
            assert!(def.probability > 0.0);
            assert!(!def.name.is_empty());
        }
    }

    #[test]
    fn test_def_for_finds_every_kind() {
        for def in POWER_UPS {
            assert_eq!(def_for(def.kind).kind, def.kind);
        }
    }

    #[test]
    fn test_roll_spawn_distribution_matches_buckets() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut spawned = 0u32;
        let trials = 20_000;
        for _ in 0..trials {
            if roll_spawn(&mut rng).is_some() {
                spawned += 1;
            }
        }
        // Total spawn probability is 0.15; allow generous slack.
        let rate = spawned as f64 / trials as f64;
        assert!(rate > 0.12 && rate < 0.18, "spawn rate {rate}");
    }

    #[test]
    fn test_roll_spawn_produces_all_kinds() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let mut seen = [false; 4];
        for _ in 0..50_000 {
            if let Some(kind) = roll_spawn(&mut rng) {
                let idx = POWER_UPS.iter().position(|d| d.kind == kind).unwrap();
                seen[idx] = true;
            }
        }
        assert!(seen.iter().all(|&s| s), "kinds seen: {seen:?}");
    }

    #[test]
    fn test_sweep_removes_only_expired() {
        let mut effects = vec![
            ActiveEffect {
                kind: PowerUpKind::TimeSlow,
                ends_at_ms: Some(1_000),
            },
            ActiveEffect {
                kind: PowerUpKind::DoubleMultiplier,
                ends_at_ms: Some(2_000),
            },
            ActiveEffect {
                kind: PowerUpKind::Shield,
                ends_at_ms: None,
            },
        ];

        let expired = sweep_expired(&mut effects, 1_500);
        assert_eq!(expired, vec![PowerUpKind::TimeSlow]);
        assert_eq!(effects.len(), 2);

        // Sweeping again at the same instant finds nothing new.
        assert!(sweep_expired(&mut effects, 1_500).is_empty());

        let expired = sweep_expired(&mut effects, 2_000);
        assert_eq!(expired, vec![PowerUpKind::DoubleMultiplier]);

        // The shield never times out.
        assert!(sweep_expired(&mut effects, i64::MAX).is_empty());
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn test_consume_effect_removes_one() {
        let mut effects = vec![ActiveEffect {
            kind: PowerUpKind::Shield,
            ends_at_ms: None,
        }];
        assert!(consume_effect(&mut effects, PowerUpKind::Shield));
        assert!(effects.is_empty());
        assert!(!consume_effect(&mut effects, PowerUpKind::Shield));
    }
}
