//! At-rest invariant sweep over a decoded root.
//!
//! The operations in this crate preserve these invariants; the audit exists
//! for ledgers that arrive from outside — it accumulates every violation it
//! finds instead of failing on the first.

use std::collections::HashSet;

use fsl_types::consts::LEAGUE_USERS_CAPACITY;
use fsl_types::{League, Root};

/// Result of a full-ledger audit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuditReport {
    pub violations: Vec<Violation>,
}

impl AuditReport {
    /// Returns `true` if every invariant held.
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// A specific invariant breach.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    pub league_index: Option<u16>,
    pub kind: ViolationKind,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViolationKind {
    CountMismatch,
    DanglingReference,
    RosterDuplicate,
    RosterOverlap,
    LineupViolation,
    PickOutOfBounds,
    PickOrderInvalid,
}

/// Sweep the whole root.
pub fn audit(root: &Root) -> AuditReport {
    let mut violations = Vec::new();

    check_arena_counts(root, &mut violations);
    check_pick_order(root, &mut violations);

    for (index, league) in root
        .leagues
        .iter()
        .take(root.leagues_count as usize)
        .enumerate()
    {
        if !league.is_initialized {
            continue;
        }
        check_league(root, index as u16, league, &mut violations);
    }

    AuditReport { violations }
}

fn check_arena_counts(root: &Root, violations: &mut Vec<Violation>) {
    for (i, player) in root.players.iter().enumerate() {
        let counted = i < root.players_count as usize;
        if player.is_initialized != counted {
            violations.push(Violation {
                league_index: None,
                kind: ViolationKind::CountMismatch,
                description: format!(
                    "player slot {} initialized={} but players_count is {}",
                    i + 1,
                    player.is_initialized,
                    root.players_count
                ),
            });
        }
    }
    for (i, league) in root.leagues.iter().enumerate() {
        let counted = i < root.leagues_count as usize;
        if league.is_initialized != counted {
            violations.push(Violation {
                league_index: Some(i as u16),
                kind: ViolationKind::CountMismatch,
                description: format!(
                    "league slot {i} initialized={} but leagues_count is {}",
                    league.is_initialized, root.leagues_count
                ),
            });
        }
    }
}

fn check_pick_order(root: &Root, violations: &mut Vec<Violation>) {
    if !root.is_pick_order_seeded() {
        return;
    }
    let mut seen = [false; LEAGUE_USERS_CAPACITY];
    for &slot in &root.pick_order {
        if slot == 0 || slot as usize > LEAGUE_USERS_CAPACITY || seen[slot as usize - 1] {
            violations.push(Violation {
                league_index: None,
                kind: ViolationKind::PickOrderInvalid,
                description: format!("pick order entry {slot} breaks the permutation"),
            });
            continue;
        }
        seen[slot as usize - 1] = true;
    }
}

fn check_league(root: &Root, index: u16, league: &League, violations: &mut Vec<Violation>) {
    if league.user_state_count > league.users_limit {
        violations.push(Violation {
            league_index: Some(index),
            kind: ViolationKind::CountMismatch,
            description: format!(
                "{} members exceed the limit of {}",
                league.user_state_count, league.users_limit
            ),
        });
    }
    if league.current_pick > league.total_picks() {
        violations.push(Violation {
            league_index: Some(index),
            kind: ViolationKind::PickOutOfBounds,
            description: format!(
                "current_pick {} exceeds {} total picks",
                league.current_pick,
                league.total_picks()
            ),
        });
    }

    let mut all_owned: HashSet<u16> = HashSet::new();
    for (user_id, state) in league.members() {
        let live = state.live_proposals().count() as u8;
        if live != state.swap_proposals_count {
            violations.push(Violation {
                league_index: Some(index),
                kind: ViolationKind::CountMismatch,
                description: format!(
                    "user {user_id} counts {} proposals but holds {live}",
                    state.swap_proposals_count
                ),
            });
        }

        let mut roster: HashSet<u16> = HashSet::new();
        for &player_id in &state.user_players {
            if player_id == 0 {
                continue;
            }
            if root.player(player_id).is_none() {
                violations.push(Violation {
                    league_index: Some(index),
                    kind: ViolationKind::DanglingReference,
                    description: format!(
                        "user {user_id} roster references unknown player {player_id}"
                    ),
                });
            }
            if !roster.insert(player_id) {
                violations.push(Violation {
                    league_index: Some(index),
                    kind: ViolationKind::RosterDuplicate,
                    description: format!("user {user_id} holds player {player_id} twice"),
                });
            } else if league.is_draft_complete() && !all_owned.insert(player_id) {
                violations.push(Violation {
                    league_index: Some(index),
                    kind: ViolationKind::RosterOverlap,
                    description: format!("player {player_id} appears on two rosters"),
                });
            }
        }

        check_lineups(root, index, user_id, state, violations);
    }
}

/// Rows for weeks already played may reference since-traded players; only
/// the current week and beyond must stay inside the roster.
fn check_lineups(
    root: &Root,
    index: u16,
    user_id: u8,
    state: &fsl_types::UserState,
    violations: &mut Vec<Violation>,
) {
    let start = root.current_week.max(1) as usize - 1;
    for (row_index, row) in state.lineups.iter().enumerate().skip(start) {
        let week = row_index + 1;
        let mut seen: HashSet<u16> = HashSet::new();
        for &player_id in row {
            if player_id == 0 {
                continue;
            }
            if !state.owns(player_id) {
                violations.push(Violation {
                    league_index: Some(index),
                    kind: ViolationKind::LineupViolation,
                    description: format!(
                        "user {user_id} week {week} lineup has foreign player {player_id}"
                    ),
                });
            }
            if !seen.insert(player_id) {
                violations.push(Violation {
                    league_index: Some(index),
                    kind: ViolationKind::LineupViolation,
                    description: format!(
                        "user {user_id} week {week} lineup repeats player {player_id}"
                    ),
                });
            }
        }
    }
}
