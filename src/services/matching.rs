//! Networking compatibility scoring.
//!
//! Two distinct paths that must never be confused: `compatibility` is the
//! deterministic, symmetric scorer behind the matching endpoint, and
//! `sample_compatibility` is the randomized variant that only feeds the
//! demo profile listing. The demo path takes its rng as a parameter so
//! tests can freeze it.

use crate::models::{CompatibilityScore, MatchProfile, Role, ScoreBreakdown};
use crate::services::catalog::Catalog;
use rand::Rng;

const BASE_SCORE: u8 = 70;
const SAME_SECTOR_BONUS: u8 = 20;
const COMPATIBLE_SECTOR_BONUS: u8 = 10;

/// Deterministic compatibility in [0, 100].
///
/// base 70, plus a sector term (identical 20, table-compatible 10), plus an
/// order-independent role-pair bonus. Swapping the profiles yields the same
/// score; missing sectors and unknown roles contribute nothing.
pub fn compatibility(catalog: &Catalog, a: &MatchProfile, b: &MatchProfile) -> CompatibilityScore {
    let sector = sector_bonus(catalog, &a.sector, &b.sector);
    let role_pair = role_pair_bonus(a.role, b.role);
    let overall = (BASE_SCORE as u16 + sector as u16 + role_pair as u16).min(100) as u8;

    CompatibilityScore {
        score: overall,
        breakdown: ScoreBreakdown {
            base: BASE_SCORE,
            sector,
            role_pair,
            overall,
        },
    }
}

fn sector_bonus(catalog: &Catalog, a: &str, b: &str) -> u8 {
    if a.is_empty() || b.is_empty() {
        0
    } else if a == b {
        SAME_SECTOR_BONUS
    } else if catalog.sectors_compatible(a, b) {
        COMPATIBLE_SECTOR_BONUS
    } else {
        0
    }
}

/// Role-pair synergy bonus, normalized so argument order cannot matter.
fn role_pair_bonus(a: Role, b: Role) -> u8 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    match (lo, hi) {
        (Role::Visitor, Role::Exhibitor) => 15,
        (Role::Visitor, Role::Partner) => 12,
        (Role::Exhibitor, Role::Partner) => 18,
        _ => 0,
    }
}

/// Demo-only score in [60, 100]: role-based base plus a random
/// perturbation. Never used by the deterministic matching endpoint.
pub fn sample_compatibility(viewer: Role, profile: Role, rng: &mut impl Rng) -> u8 {
    let mut score = 75i32;
    let cross_visitor = matches!(
        (viewer, profile),
        (Role::Visitor, Role::Exhibitor | Role::Partner)
            | (Role::Exhibitor | Role::Partner, Role::Visitor)
    );
    if cross_visitor {
        score += 15;
    }
    score += rng.gen_range(-10..=20);
    score.clamp(60, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn catalog() -> Catalog {
        Catalog::embedded().unwrap()
    }

    fn profile(role: Role, sector: &str) -> MatchProfile {
        MatchProfile {
            role,
            sector: sector.to_string(),
        }
    }

    #[test]
    fn test_visitor_exhibitor_compatible_sectors_score_95() {
        let catalog = catalog();
        let a = profile(Role::Visitor, "Gestion Portuaire");
        let b = profile(Role::Exhibitor, "Technologies Marines");
        let result = compatibility(&catalog, &a, &b);
        assert_eq!(result.score, 95);
        assert_eq!(result.breakdown.base, 70);
        assert_eq!(result.breakdown.sector, 10);
        assert_eq!(result.breakdown.role_pair, 15);
    }

    #[test]
    fn test_score_is_symmetric_for_all_role_pairs() {
        let catalog = catalog();
        let roles = [Role::Visitor, Role::Exhibitor, Role::Partner, Role::Unknown];
        let sectors = ["Gestion Portuaire", "Technologies Marines", "Autre", ""];
        for &ra in &roles {
            for &rb in &roles {
                for sa in &sectors {
                    for sb in &sectors {
                        let a = profile(ra, sa);
                        let b = profile(rb, sb);
                        assert_eq!(
                            compatibility(&catalog, &a, &b).score,
                            compatibility(&catalog, &b, &a).score,
                            "asymmetric for {:?}/{} vs {:?}/{}",
                            ra,
                            sa,
                            rb,
                            sb
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_score_clamps_at_100() {
        let catalog = catalog();
        // 70 + 20 (same sector) + 18 (exhibitor/partner) = 108, clamped.
        let a = profile(Role::Exhibitor, "Technologies Marines");
        let b = profile(Role::Partner, "Technologies Marines");
        let result = compatibility(&catalog, &a, &b);
        assert_eq!(result.score, 100);
        assert_eq!(result.breakdown.overall, 100);
    }

    #[test]
    fn test_unknown_roles_and_sectors_score_base() {
        let catalog = catalog();
        let a = profile(Role::Unknown, "");
        let b = profile(Role::Unknown, "");
        assert_eq!(compatibility(&catalog, &a, &b).score, 70);
    }

    #[test]
    fn test_identical_sector_beats_table_pair() {
        let catalog = catalog();
        let same = compatibility(
            &catalog,
            &profile(Role::Visitor, "Solutions IoT"),
            &profile(Role::Visitor, "Solutions IoT"),
        );
        let paired = compatibility(
            &catalog,
            &profile(Role::Visitor, "Logistique Maritime"),
            &profile(Role::Visitor, "Solutions IoT"),
        );
        assert_eq!(same.score, 90);
        assert_eq!(paired.score, 80);
    }

    #[test]
    fn test_sample_compatibility_stays_in_demo_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let score = sample_compatibility(Role::Visitor, Role::Exhibitor, &mut rng);
            assert!((60..=100).contains(&score));
        }
    }

    #[test]
    fn test_sample_compatibility_is_reproducible_with_seed() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(
                sample_compatibility(Role::Visitor, Role::Partner, &mut a),
                sample_compatibility(Role::Visitor, Role::Partner, &mut b)
            );
        }
    }
}
