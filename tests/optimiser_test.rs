//! End-to-end optimisation runs against the bundled solver

use std::collections::HashMap;

use fpl_optimiser::{
    config::{PositionRule, StartingCounts},
    optimise, read_catalog, Catalog, CurrentSquad, Gameweek, GoodLpSolver, Identifier,
    OptimiserConfig, OptimiserError, Player, PlayerId, Position, RosterPlan, SquadRules,
};

/// (id, name, team, position, cost, points)
const ROWS: &[(u32, &str, &str, Position, f64, f64)] = &[
    (1, "Raya", "Arsenal", Position::GK, 5.5, 5.0),
    (2, "Pickford", "Everton", Position::GK, 5.0, 4.0),
    (3, "Sanchez", "Chelsea", Position::GK, 4.5, 3.0),
    (4, "Saliba", "Arsenal", Position::DEF, 6.0, 6.0),
    (5, "Gabriel", "Arsenal", Position::DEF, 6.0, 5.8),
    (6, "Van Dijk", "Liverpool", Position::DEF, 6.5, 5.5),
    (7, "Gvardiol", "Man City", Position::DEF, 6.0, 5.0),
    (8, "Porro", "Spurs", Position::DEF, 5.5, 4.5),
    (9, "Mykolenko", "Everton", Position::DEF, 4.5, 3.0),
    (10, "Colwill", "Chelsea", Position::DEF, 4.5, 3.2),
    (11, "Saka", "Arsenal", Position::MID, 10.0, 8.0),
    (12, "Odegaard", "Arsenal", Position::MID, 8.5, 7.0),
    (13, "Salah", "Liverpool", Position::MID, 13.0, 9.0),
    (14, "Palmer", "Chelsea", Position::MID, 10.5, 7.5),
    (15, "Foden", "Man City", Position::MID, 9.0, 6.0),
    (16, "Maddison", "Spurs", Position::MID, 7.5, 5.0),
    (17, "Smith", "Fulham", Position::MID, 4.5, 3.0),
    (18, "Haaland", "Man City", Position::FWD, 15.0, 9.5),
    (19, "Watkins", "Villa", Position::FWD, 9.0, 6.5),
    (20, "Isak", "Newcastle", Position::FWD, 8.5, 6.8),
    (21, "Núñez", "Liverpool", Position::FWD, 7.5, 5.5),
    (22, "Smith", "Brentford", Position::FWD, 4.5, 2.0),
];

/// A legal 15 worth exactly 96.0.
const CHEAP_SQUAD: [u32; 15] = [2, 3, 4, 7, 8, 9, 10, 11, 12, 15, 16, 17, 20, 21, 22];

fn catalog_with(periods: usize, points: impl Fn(u32, f64, usize) -> f64) -> Catalog {
    let players = ROWS
        .iter()
        .map(|&(id, name, team, position, cost, pts)| Player {
            id: PlayerId::new(id),
            name: name.to_string(),
            team: team.to_string(),
            position,
            cost,
            sale_value: cost,
            points: (0..periods).map(|p| points(id, pts, p)).collect(),
        })
        .collect();
    Catalog::new(players, Gameweek::new(10), periods).unwrap()
}

fn catalog() -> Catalog {
    catalog_with(1, |_, pts, _| pts)
}

fn with_budget(budget: f64) -> OptimiserConfig {
    OptimiserConfig {
        budget: Some(budget),
        ..OptimiserConfig::default()
    }
}

fn run(catalog: &Catalog, config: &OptimiserConfig) -> fpl_optimiser::Result<RosterPlan> {
    optimise(catalog, config, &mut GoodLpSolver::new())
}

fn ids(ids: &[u32]) -> Vec<Identifier> {
    ids.iter().map(|&id| Identifier::ById(id)).collect()
}

fn team_counts<'a>(teams: impl Iterator<Item = &'a str>) -> HashMap<&'a str, usize> {
    let mut counts = HashMap::new();
    for team in teams {
        *counts.entry(team).or_insert(0) += 1;
    }
    counts
}

fn objective(plan: &RosterPlan, bench_strength: f64) -> f64 {
    (1.0 - bench_strength) * plan.total_starting_points + bench_strength * plan.total_bench_points
}

#[test]
fn test_single_gameweek_plan_follows_fpl_rules() {
    let catalog = catalog();
    let plan = run(&catalog, &with_budget(100.0)).unwrap();

    assert_eq!(plan.periods.len(), 1);
    let period = &plan.periods[0];
    assert_eq!(period.gameweek, Gameweek::new(10));
    assert_eq!(period.starting.len(), 11);
    assert_eq!(period.bench.len(), 4);
    assert!(period.squad_value <= 100.0 + 1e-6);

    let captains: Vec<_> = period.starting.iter().filter(|e| e.is_captain).collect();
    assert_eq!(captains.len(), 1);
    assert_eq!(captains[0].id, period.captain);

    let rules = SquadRules::fpl();
    for position in Position::ALL {
        let rule = rules.rule(position);
        let in_squad = period.squad().filter(|e| e.position == position).count();
        let starting = period
            .starting
            .iter()
            .filter(|e| e.position == position)
            .count();
        assert_eq!(in_squad, rule.squad_count, "{} squad count", position);
        assert!(rule.allows_starting(starting), "{} starting count", position);
    }

    assert!(team_counts(period.squad().map(|e| e.team.as_str()))
        .values()
        .all(|&count| count <= 3));

    // Bench leads with the reserve goalkeeper.
    assert_eq!(period.bench[0].position, Position::GK);
}

#[test]
fn test_team_limit_binds_when_budget_is_loose() {
    let catalog = catalog();
    let plan = run(&catalog, &with_budget(200.0)).unwrap();

    let counts = team_counts(plan.periods[0].squad().map(|e| e.team.as_str()));
    assert_eq!(counts.get("Arsenal"), Some(&3));
    // With money no object, the best-scoring player captains.
    assert_eq!(plan.periods[0].captain, PlayerId::new(18));
}

#[test]
fn test_budget_below_cheapest_legal_squad_is_infeasible() {
    let catalog = catalog();
    let result = run(&catalog, &with_budget(90.0));
    assert!(matches!(result, Err(OptimiserError::Infeasible)));
}

#[test]
fn test_banned_team_is_case_insensitive() {
    let catalog = catalog();
    let config = OptimiserConfig {
        banned_teams: vec!["  arsenal ".to_string()],
        ..with_budget(110.0)
    };
    let plan = run(&catalog, &config).unwrap();

    let period = &plan.periods[0];
    assert!(period.squad().all(|e| e.team != "Arsenal"));
    // Only five defenders and five midfielders remain outside Arsenal.
    let squad = period.squad_ids();
    for id in [6, 7, 8, 9, 10, 13, 14, 15, 16, 17] {
        assert!(squad.contains(&PlayerId::new(id)), "player {} missing", id);
    }
}

#[test]
fn test_locked_in_by_name_ignores_accents_and_case() {
    let catalog = catalog();
    let config = OptimiserConfig {
        locked_in: vec![Identifier::from("nunez")],
        ..with_budget(100.0)
    };
    let plan = run(&catalog, &config).unwrap();
    assert!(plan.periods[0].squad_ids().contains(&PlayerId::new(21)));
}

#[test]
fn test_ambiguous_name_lists_both_candidates() {
    let catalog = catalog();
    let config = OptimiserConfig {
        locked_in: vec![Identifier::from("Smith")],
        ..with_budget(100.0)
    };

    match run(&catalog, &config) {
        Err(OptimiserError::Ambiguous { candidates, .. }) => {
            let found: Vec<u32> = candidates.iter().map(|(id, _)| id.as_u32()).collect();
            assert_eq!(found.len(), 2);
            assert!(found.contains(&17));
            assert!(found.contains(&22));
        }
        other => panic!("expected Ambiguous, got {:?}", other),
    }
}

#[test]
fn test_unknown_player_is_not_found() {
    let catalog = catalog();
    let config = OptimiserConfig {
        excluded: vec![Identifier::from("Kane")],
        ..with_budget(100.0)
    };
    assert!(matches!(
        run(&catalog, &config),
        Err(OptimiserError::NotFound { .. })
    ));
}

#[test]
fn test_excluded_player_is_never_picked() {
    let catalog = catalog();
    let config = OptimiserConfig {
        excluded: vec![Identifier::from("Haaland")],
        ..with_budget(200.0)
    };
    let plan = run(&catalog, &config).unwrap();
    assert!(!plan.periods[0].squad_ids().contains(&PlayerId::new(18)));
}

#[test]
fn test_starting_and_bench_pins() {
    let catalog = catalog();
    let config = OptimiserConfig {
        starting_pinned: vec![Identifier::from("Sanchez")],
        bench_pinned: vec![Identifier::from("Salah")],
        ..with_budget(110.0)
    };
    let plan = run(&catalog, &config).unwrap();
    let period = &plan.periods[0];

    assert!(period.starting.iter().any(|e| e.id == PlayerId::new(3)));
    assert!(period.bench.iter().any(|e| e.id == PlayerId::new(13)));
}

#[test]
fn test_pinned_formation() {
    let catalog = catalog();
    let config = OptimiserConfig {
        starting_counts: StartingCounts {
            def: Some(5),
            ..StartingCounts::default()
        },
        ..with_budget(100.0)
    };
    let plan = run(&catalog, &config).unwrap();
    let defenders = plan.periods[0]
        .starting
        .iter()
        .filter(|e| e.position == Position::DEF)
        .count();
    assert_eq!(defenders, 5);
}

#[test]
fn test_invalid_parameters_fail_before_solving() {
    let catalog = catalog();

    let config = OptimiserConfig {
        bench_strength: 1.5,
        ..with_budget(100.0)
    };
    assert!(matches!(
        run(&catalog, &config),
        Err(OptimiserError::InvalidParameter { .. })
    ));

    let config = OptimiserConfig {
        num_periods: 2,
        ..with_budget(100.0)
    };
    assert!(matches!(
        run(&catalog, &config),
        Err(OptimiserError::InvalidParameter { .. })
    ));

    let config = OptimiserConfig::default();
    assert!(matches!(
        run(&catalog, &config),
        Err(OptimiserError::InvalidParameter { .. })
    ));
}

#[test]
fn test_transfers_between_gameweeks_respect_free_transfers() {
    // Both Smiths explode in the second gameweek.
    let catalog = catalog_with(2, |id, pts, p| match (id, p) {
        (17 | 22, 1) => 50.0,
        (17 | 22, 0) => 0.0,
        _ => pts,
    });
    let config = OptimiserConfig {
        num_periods: 2,
        ..with_budget(100.0)
    };
    let plan = run(&catalog, &config).unwrap();

    assert_eq!(plan.periods.len(), 2);
    assert_eq!(plan.last_gameweek(), Some(Gameweek::new(11)));

    let second = &plan.periods[1];
    let squad = second.squad_ids();
    assert!(squad.contains(&PlayerId::new(17)));
    assert!(squad.contains(&PlayerId::new(22)));
    assert!([17, 22].contains(&second.captain.as_u32()));

    assert!(second.transfers_in.len() <= 1);
    assert_eq!(second.transfers_in.len(), second.transfers_out.len());

    let first = plan.periods[0].squad_ids();
    let changed = squad.iter().filter(|id| !first.contains(id)).count();
    assert_eq!(changed, second.transfers_in.len());
}

#[test]
fn test_current_squad_limits_first_gameweek_transfers() {
    let catalog = catalog();
    let current = CurrentSquad {
        players: ids(&CHEAP_SQUAD),
        bank: 30.0,
    };
    let config = OptimiserConfig {
        budget: None,
        free_transfers: 1,
        current_squad: Some(current.clone()),
        ..OptimiserConfig::default()
    };

    let plan = run(&catalog, &config).unwrap();
    assert!((plan.budget - 126.0).abs() < 1e-9);
    let held = plan.current_squad.as_ref().unwrap();
    assert_eq!(held.players.len(), 15);
    assert_eq!(held.bank, 30.0);
    let period = &plan.periods[0];
    assert!(period.transfers_in.len() <= 1);
    assert_eq!(period.transfers_in.len(), period.transfers_out.len());

    let wildcard = OptimiserConfig {
        wildcard: true,
        ..config.clone()
    };
    // Plenty of cash: a wildcard makes several upgrades at once.
    let free_plan = run(&catalog, &wildcard).unwrap();
    assert!(objective(&free_plan, 0.1) >= objective(&plan, 0.1) - 1e-6);
    assert!(free_plan.periods[0].transfers_in.len() > 1);
}

#[test]
fn test_unused_free_transfer_rolls_over() {
    // Outsiders score nothing, except Salah and Haaland in the third gameweek.
    let catalog = catalog_with(3, |id, pts, p| match (id, p) {
        (13 | 18, 2) => 50.0,
        _ if CHEAP_SQUAD.contains(&id) => pts,
        _ => 0.0,
    });
    let config = OptimiserConfig {
        num_periods: 3,
        budget: None,
        free_transfers: 1,
        current_squad: Some(CurrentSquad {
            players: ids(&CHEAP_SQUAD),
            bank: 30.0,
        }),
        ..OptimiserConfig::default()
    };

    let plan = run(&catalog, &config).unwrap();
    assert_eq!(plan.periods.len(), 3);
    assert_eq!(plan.last_gameweek(), Some(Gameweek::new(12)));

    for period in &plan.periods[..2] {
        assert!(period.transfers_in.is_empty(), "GW{}", period.gameweek);
        assert!(period.transfers_out.is_empty(), "GW{}", period.gameweek);
    }

    let last = &plan.periods[2];
    let mut bought: Vec<u32> = last.transfers_in.iter().map(|e| e.id.as_u32()).collect();
    bought.sort_unstable();
    assert_eq!(bought, vec![13, 18]);
    assert_eq!(last.transfers_out.len(), 2);
}

#[test]
fn test_four_player_squad() {
    let csv = "id,team,pos,name,cost,1_pts\n\
               1,A,GK,Keeper,4,2\n\
               2,B,DEF,Back,4,5\n\
               3,C,MID,Middle,4,6\n\
               4,D,FWD,Striker,4,8\n";
    let catalog = read_catalog(csv.as_bytes()).unwrap();
    let config = OptimiserConfig {
        budget: Some(20.0),
        squad_rules: SquadRules {
            squad_size: 4,
            starting_size: 4,
            max_transfers_per_period: 1,
            positions: [
                PositionRule::new(Position::GK, 1, 1, 1),
                PositionRule::new(Position::DEF, 1, 1, 1),
                PositionRule::new(Position::MID, 1, 1, 1),
                PositionRule::new(Position::FWD, 1, 1, 1),
            ],
        },
        ..OptimiserConfig::default()
    };

    let plan = run(&catalog, &config).unwrap();
    let period = &plan.periods[0];
    assert_eq!(period.starting.len(), 4);
    assert!(period.bench.is_empty());
    assert_eq!(period.captain, PlayerId::new(4));
    assert_eq!(period.captain_bonus, 8.0);
    assert_eq!(plan.total_starting_points, 29.0);
}
