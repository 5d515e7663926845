use std::fs;
use std::path::PathBuf;

use profit_content::ContentFactory;
use profit_core::{
    ActionId, BuffKind, EvaluationMode, ItemId, LuckCurve, ProfitConfig, compute_profit,
    compute_profit_with,
};

fn sample_data() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../../data")
}

#[test]
fn sample_data_directory_loads() {
    let factory = ContentFactory::new(sample_data());
    let oracles = factory.load_oracles().unwrap();
    let buffs = factory.load_buffs().unwrap();
    let policy = factory.load_policy().unwrap();

    assert_eq!(oracles.catalog().actions.len(), 3);
    assert!((buffs.total(BuffKind::RareFind) - 0.15).abs() < 1e-12);
    assert_eq!(policy, profit_core::ModelPolicy::default());
}

#[test]
fn crafting_profit_from_sample_data() {
    let oracles = ContentFactory::new(sample_data()).load_oracles().unwrap();
    let report = compute_profit(
        oracles.as_profit_env(),
        &ActionId::from("/actions/cheesesmithing/cheese"),
        &ProfitConfig::new(1.0),
    )
    .unwrap();

    // 360 cheeses at 72 from 720 milk at 24
    assert!((report.income - 25_920.0).abs() < 1e-6);
    assert!((report.cost - 17_280.0).abs() < 1e-6);
    assert!((report.profit - 8_640.0).abs() < 1e-6);
}

#[test]
fn gathering_with_sample_buffs_in_both_modes() {
    let factory = ContentFactory::new(sample_data());
    let oracles = factory.load_oracles().unwrap();
    let policy = factory.load_policy().unwrap();
    let buffs = factory.load_buffs().unwrap();
    let action = ActionId::from("/actions/foraging/egg");

    let average = compute_profit_with(
        oracles.as_profit_env(),
        &action,
        &ProfitConfig::new(24.0).with_buffs(buffs.clone()),
        &policy,
    )
    .unwrap();
    let unlucky = compute_profit_with(
        oracles.as_profit_env(),
        &action,
        &ProfitConfig::new(24.0)
            .with_buffs(buffs)
            .with_mode(EvaluationMode::Quantile(0.05)),
        &policy,
    )
    .unwrap();

    assert_eq!(average.outputs.len(), 4);
    assert!(average.outputs[3].is_container());
    assert!(unlucky.income < average.income);
}

#[test]
fn meteorite_cache_is_priced_and_curved() {
    let oracles = ContentFactory::new(sample_data()).load_oracles().unwrap();
    let env = oracles.as_profit_env();
    let cache = ItemId::from("/items/small_meteorite_cache");

    // (8 * 5800 + 1000) / (1 - 0.05)
    let price = env.market().unwrap().sell_price(&cache, 0);
    assert!((price - 47_400.0 / 0.95).abs() < 1e-6);

    let curve = LuckCurve::for_openable(env, &cache, 10.0, &Default::default()).unwrap();
    assert_eq!(curve.points.len(), 199);
    let median = curve.points[99].total;
    assert!(curve.observed_luck(median) <= 0.5 + 1e-9);
}

#[test]
fn loads_from_temporary_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(ContentFactory::CATALOG_FILE),
        r#"(actions: [(id: "chop", base_time_cost: 5.0, outputs: [(item_id: "log", count: 2.0)])])"#,
    )
    .unwrap();
    fs::write(
        dir.path().join(ContentFactory::MARKET_FILE),
        r#"{"marketData": {"log": {"0": {"a": 4, "b": 3}}}}"#,
    )
    .unwrap();
    fs::write(dir.path().join(ContentFactory::POLICY_FILE), "scale = 10.0\n").unwrap();

    let factory = ContentFactory::new(dir.path());
    let oracles = factory.load_oracles().unwrap();
    assert_eq!(factory.load_policy().unwrap().scale, 10.0);

    let report = compute_profit(
        oracles.as_profit_env(),
        &ActionId::from("chop"),
        &ProfitConfig::new(1.0),
    )
    .unwrap();
    // 720 repetitions, 2 logs each at 3
    assert!((report.income - 4320.0).abs() < 1e-6);
}

#[test]
fn malformed_market_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(ContentFactory::CATALOG_FILE), "(actions: [])").unwrap();
    fs::write(dir.path().join(ContentFactory::MARKET_FILE), "not json").unwrap();

    let err = ContentFactory::new(dir.path()).load_oracles().unwrap_err();
    assert!(format!("{err:#}").contains("market.json"));
}
