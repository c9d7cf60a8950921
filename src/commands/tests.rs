//! Unit tests for command handlers

use super::*;

#[cfg(test)]
mod entry_id_tests {
    use super::*;

    #[test]
    fn test_resolve_entry_id_from_option() {
        let result = resolve_entry_id(Some(EntryId::new(12345)));
        assert_eq!(result.unwrap().as_u32(), 12345);
    }

    // One test covers every env var case so parallel tests never race on it.
    #[test]
    fn test_resolve_entry_id_from_env() {
        std::env::set_var(ENTRY_ID_ENV_VAR, "54321");
        assert_eq!(resolve_entry_id(None).unwrap().as_u32(), 54321);

        std::env::set_var(ENTRY_ID_ENV_VAR, "not_a_number");
        assert!(resolve_entry_id(None).is_err());

        std::env::remove_var(ENTRY_ID_ENV_VAR);
        match resolve_entry_id(None).unwrap_err() {
            OptimiserError::MissingEntryId { env_var } => assert_eq!(env_var, ENTRY_ID_ENV_VAR),
            other => panic!("Expected MissingEntryId error, got {other:?}"),
        }

        // An explicit id still wins over a missing env var.
        assert_eq!(resolve_entry_id(Some(EntryId::new(7))).unwrap().as_u32(), 7);
    }
}

#[cfg(test)]
mod build_config_tests {
    use super::*;
    use crate::cli::{Commands, FplOpt, OptimiseArgs};
    use crate::cli::types::Identifier;
    use crate::commands::optimise::build_config;
    use crate::config::PriceBasis;
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    fn parse(extra: &[&str]) -> OptimiseArgs {
        let mut argv = vec!["fpl-opt", "optimise", "--data", "proj.csv"];
        argv.extend_from_slice(extra);
        match FplOpt::try_parse_from(argv).unwrap().command {
            Commands::Optimise(args) => args,
            _ => panic!("expected optimise"),
        }
    }

    #[test]
    fn test_defaults_without_flags() {
        let config = build_config(&parse(&[])).unwrap();
        assert_eq!(config, crate::config::OptimiserConfig::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = build_config(&parse(&[
            "-n",
            "4",
            "-b",
            "99.5",
            "--wildcard",
            "--bench-strength",
            "0.2",
            "--discount",
            "0.9",
            "--def",
            "4",
            "--out",
            "Haaland",
            "--squad",
            "1,2",
            "--bank",
            "1.5",
        ]))
        .unwrap();

        assert_eq!(config.num_periods, 4);
        assert_eq!(config.budget, Some(99.5));
        assert!(config.wildcard);
        assert_eq!(config.bench_strength, 0.2);
        assert_eq!(config.future_discount, 0.9);
        assert_eq!(config.starting_counts.def, Some(4));
        assert_eq!(config.excluded, vec![Identifier::ByName("Haaland".into())]);
        let squad = config.current_squad.unwrap();
        assert_eq!(squad.players, vec![Identifier::ById(1), Identifier::ById(2)]);
        assert_eq!(squad.bank, 1.5);
    }

    #[test]
    fn test_numeric_flags_resolve_players_by_id() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rules.json");
        fs::write(
            &path,
            r#"{"squadRules": {
                "squadSize": 4,
                "startingSize": 4,
                "maxTransfersPerPeriod": 1,
                "positions": [
                    {"position": "GK", "squadCount": 1, "minStarting": 1, "maxStarting": 1},
                    {"position": "DEF", "squadCount": 1, "minStarting": 1, "maxStarting": 1},
                    {"position": "MID", "squadCount": 1, "minStarting": 1, "maxStarting": 1},
                    {"position": "FWD", "squadCount": 1, "minStarting": 1, "maxStarting": 1}
                ]
            }}"#,
        )
        .unwrap();
        let path_str = path.to_string_lossy().to_string();

        let args = parse(&[
            "-c", &path_str, "--out", "5", "--in", "1", "--squad", "1,2,3,4", "--bank", "4",
        ]);
        let config = build_config(&args).unwrap();
        assert_eq!(config.excluded, vec![Identifier::ById(5)]);
        assert_eq!(config.locked_in, vec![Identifier::ById(1)]);

        let catalog = crate::catalog::read_catalog(
            "id,team,pos,name,cost,1_pts\n\
             1,A,GK,Keeper,4,2\n\
             2,B,DEF,Back,4,5\n\
             3,C,MID,Middle,4,6\n\
             4,D,FWD,Striker,4,8\n\
             5,E,GK,Star Keeper,4,9\n"
                .as_bytes(),
        )
        .unwrap();
        let plan =
            crate::optimise(&catalog, &config, &mut crate::solver::GoodLpSolver::new()).unwrap();

        assert!((plan.budget - 20.0).abs() < 1e-9);
        let mut squad: Vec<u32> = plan.periods[0]
            .squad_ids()
            .iter()
            .map(|id| id.as_u32())
            .collect();
        squad.sort_unstable();
        assert_eq!(squad, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_config_file_merged_with_flags() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.json");
        fs::write(
            &path,
            r#"{"numPeriods": 2, "budget": 100.0, "bannedTeams": ["Spurs"], "priceBasis": "cost"}"#,
        )
        .unwrap();
        let path_str = path.to_string_lossy().to_string();

        let config = build_config(&parse(&["-c", &path_str, "--ban", "Chelsea", "-n", "3"])).unwrap();

        assert_eq!(config.num_periods, 3);
        assert_eq!(config.budget, Some(100.0));
        assert_eq!(config.price_basis, PriceBasis::Cost);
        assert_eq!(
            config.banned_teams,
            vec!["Spurs".to_string(), "Chelsea".to_string()]
        );
    }

    #[test]
    fn test_missing_config_file() {
        let result = build_config(&parse(&["-c", "/nonexistent/run.json"]));
        assert!(matches!(result, Err(OptimiserError::Io(_))));
    }
}

#[cfg(test)]
mod current_squad_tests {
    use super::*;
    use crate::catalog::read_catalog;
    use crate::commands::current_squad::squad_players;
    use crate::fpl::EntryPicks;
    use serde_json::json;

    const CSV: &str = "\
id,name,team,pos,cost,sale_value,points
1,Raya,Arsenal,GK,5.5,5.5,4.0
2,Saka,Arsenal,MID,10.0,9.8,7.0
3,Haaland,Man City,FWD,15.0,14.5,8.5
";

    fn picks(ids: &[u32]) -> EntryPicks {
        let picks: Vec<_> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| json!({"element": id, "position": i + 1}))
            .collect();
        serde_json::from_value(json!({
            "picks": picks,
            "entry_history": {"event": 8, "bank": 3}
        }))
        .unwrap()
    }

    #[test]
    fn test_squad_players_in_pick_order() {
        let catalog = read_catalog(CSV.as_bytes()).unwrap();
        let players = squad_players(&catalog, &picks(&[3, 1])).unwrap();
        let names: Vec<_> = players.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Haaland", "Raya"]);
    }

    #[test]
    fn test_squad_players_unknown_id() {
        let catalog = read_catalog(CSV.as_bytes()).unwrap();
        let err = squad_players(&catalog, &picks(&[1, 404])).unwrap_err();
        assert!(matches!(err, OptimiserError::NotFound { identifier } if identifier == "id 404"));
    }
}
