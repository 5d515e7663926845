use profit_core::{
    ActionDetails, ActionId, BuffKind, BuffSource, BuffVector, CatalogSnapshot, DropEntry,
    DropTier, Env, EvaluationMode, ItemCount, ItemId, LuckCurve, MarketOracle, MarketSnapshot,
    ModelPolicy, OpenableAwareMarket, OracleError, ProfitConfig, ProfitEnv, ProfitError, Quote,
    UNAFFORDABLE_PRICE, compute_profit,
};

fn catalog() -> CatalogSnapshot {
    CatalogSnapshot::new()
        .with_action(
            ActionDetails::new("milking/cow", 10.0).with_output(ItemCount::new("milk", 1.0)),
        )
        .with_action(
            ActionDetails::new("foraging/meadow", 10.0)
                .with_rare_drop(DropEntry::new("four_leaf", 0.01, 1.0, 1.0)),
        )
        .with_action(
            ActionDetails::new("cheesesmithing/cheese", 12.0)
                .with_input(ItemCount::new("milk", 2.0))
                .with_input(ItemCount::new("rennet", 1.0))
                .with_output(ItemCount::new("cheese", 1.0)),
        )
        .with_action(
            ActionDetails::new("woodcutting/tree", 10.0)
                .with_common_drop(DropEntry::new("log", 1.0, 1.0, 3.0))
                .with_essence_drop(DropEntry::new("essence", 0.1, 1.0, 1.0))
                .with_rare_drop(DropEntry::new("small_crate", 0.02, 1.0, 1.0)),
        )
        .with_openable(
            "small_crate",
            vec![
                DropEntry::new("coin", 1.0, 100.0, 300.0),
                DropEntry::new("four_leaf", 0.5, 1.0, 1.0),
            ],
        )
}

fn market() -> MarketSnapshot {
    MarketSnapshot::new()
        .with_quote("milk", 0, Quote::new(110.0, 100.0))
        .with_quote("four_leaf", 0, Quote::new(55.0, 50.0))
        .with_quote("cheese", 0, Quote::new(400.0, 380.0))
        .with_quote("log", 0, Quote::new(12.0, 10.0))
        .with_quote("essence", 0, Quote::new(30.0, 25.0))
        .with_quote("coin", 0, Quote::new(1.0, 1.0))
}

#[test]
fn one_hour_of_fixed_output() {
    let (catalog, market) = (catalog(), market());
    let report = compute_profit(
        Env::with_all(&catalog, &market),
        &ActionId::from("milking/cow"),
        &ProfitConfig::new(1.0),
    )
    .unwrap();

    assert!((report.repetitions - 360.0).abs() < 1e-9);
    assert!((report.income - 36_000.0).abs() < 1e-6);
    assert_eq!(report.cost, 0.0);
    assert_eq!(report.profit, report.income);
    assert_eq!(report.outputs[0].tier, DropTier::Output);
}

#[test]
fn fixed_output_is_identical_in_quantile_mode() {
    let (catalog, market) = (catalog(), market());
    let config = ProfitConfig::new(1.0).with_mode(EvaluationMode::Quantile(0.1));
    let report = compute_profit(
        Env::with_all(&catalog, &market),
        &ActionId::from("milking/cow"),
        &config,
    )
    .unwrap();
    assert!((report.income - 36_000.0).abs() < 1e-6);
}

#[test]
fn rare_drop_average_and_median() {
    let (catalog, market) = (catalog(), market());
    let env = Env::with_all(&catalog, &market);
    let action = ActionId::from("foraging/meadow");
    // 1000 rolls
    let hours = 1000.0 * 10.0 / 3600.0;

    let average = compute_profit(env, &action, &ProfitConfig::new(hours)).unwrap();
    assert!((average.repetitions - 1000.0).abs() < 1e-6);
    assert!((average.income - 500.0).abs() < 1e-6);

    let median = compute_profit(
        env,
        &action,
        &ProfitConfig::new(hours).with_mode(EvaluationMode::Quantile(0.5)),
    )
    .unwrap();
    // Poisson(10) median is 10 drops; allow one drop of rounding
    assert!((median.income - 500.0).abs() <= 50.0 + 1e-9, "{}", median.income);
}

#[test]
fn inputs_are_costed_at_buy_price() {
    let (catalog, market) = (catalog(), market());
    let report = compute_profit(
        Env::with_all(&catalog, &market),
        &ActionId::from("cheesesmithing/cheese"),
        &ProfitConfig::new(1.0),
    )
    .unwrap();

    // 300 repetitions
    assert!((report.inputs[0].count - 600.0).abs() < 1e-9);
    assert!((report.inputs[0].cost - 66_000.0).abs() < 1e-6);
    // nobody sells rennet
    assert_eq!(report.inputs[1].price, UNAFFORDABLE_PRICE);
    assert!(report.profit < 0.0);
}

#[test]
fn every_tier_receives_its_buff() {
    let (catalog, market) = (catalog(), market());
    let buffs = BuffVector::new()
        .with(BuffSource::Tea, BuffKind::Gathering, 0.5)
        .with(BuffSource::Equipment, BuffKind::EssenceFind, 1.0)
        .with(BuffSource::House, BuffKind::RareFind, 1.0);
    let report = compute_profit(
        Env::with_all(&catalog, &market),
        &ActionId::from("woodcutting/tree"),
        &ProfitConfig::new(1.0).with_buffs(buffs),
    )
    .unwrap();

    let [log, essence, crate_line] = report.outputs.as_slice() else {
        panic!("expected three lines, got {:?}", report.outputs);
    };
    // logs: 360 * (1.5 + 4.5) / 2
    assert!((log.count - 1080.0).abs() < 1e-6);
    assert!((essence.buffed.probability - 0.2).abs() < 1e-12);
    assert!((essence.count - 72.0).abs() < 1e-6);
    assert!((crate_line.buffed.probability - 0.04).abs() < 1e-12);
}

#[test]
fn container_line_is_valued_by_contents() {
    let (catalog, market) = (catalog(), market());
    let report = compute_profit(
        Env::with_all(&catalog, &market),
        &ActionId::from("woodcutting/tree"),
        &ProfitConfig::new(1.0),
    )
    .unwrap();

    let crate_line = report
        .outputs
        .iter()
        .find(|line| line.item_id == ItemId::from("small_crate"))
        .unwrap();
    // 7.2 crates: 1440 coins plus 3.6 four-leaf clovers at 50
    assert!(crate_line.is_container());
    assert!((crate_line.count - 7.2).abs() < 1e-9);
    assert!((crate_line.income - 1620.0).abs() < 1e-6);
    assert!((crate_line.price - 225.0).abs() < 1e-6);

    let total: f64 = report.outputs.iter().map(|line| line.income).sum();
    assert!((report.income - total).abs() < 1e-9);
}

#[test]
fn openable_aware_market_prices_unlisted_crates() {
    let catalog = catalog();
    let market = OpenableAwareMarket::new(market(), &catalog);
    let env: ProfitEnv<'_> = Env::with_all(&catalog, &market).into_profit_env();

    let curve = LuckCurve::for_openable(
        env,
        &ItemId::from("small_crate"),
        20.0,
        &ModelPolicy::default(),
    )
    .unwrap();
    assert!(!curve.is_empty());

    // 200 coins + 0.5 clovers at 50
    assert!((market.sell_price(&ItemId::from("small_crate"), 0) - 225.0).abs() < 1e-9);
}

#[test]
fn self_dropping_container_folds_its_copies_into_the_price() {
    let catalog = CatalogSnapshot::new()
        .with_action(
            ActionDetails::new("mining/rock", 10.0)
                .with_rare_drop(DropEntry::new("geode", 0.1, 1.0, 1.0)),
        )
        .with_openable(
            "geode",
            vec![
                DropEntry::new("gem", 1.0, 2.0, 2.0),
                DropEntry::new("geode", 0.2, 1.0, 1.0),
            ],
        );
    let market = OpenableAwareMarket::new(
        MarketSnapshot::new().with_quote("gem", 0, Quote::new(120.0, 100.0)),
        &catalog,
    );
    let env: ProfitEnv<'_> = Env::with_all(&catalog, &market).into_profit_env();

    let report =
        compute_profit(env, &ActionId::from("mining/rock"), &ProfitConfig::new(1.0)).unwrap();

    // 36 geodes, each worth 200 in gems over 1 - 0.2 openings
    let [geode] = report.outputs.as_slice() else {
        panic!("expected one line, got {:?}", report.outputs);
    };
    assert!((geode.count - 36.0).abs() < 1e-9);
    assert!((geode.income - 36.0 * 200.0 / 0.8).abs() < 1e-6);
    assert!((geode.price - 250.0).abs() < 1e-9);

    let copies = &geode.contents[1];
    assert!((copies.count - 7.2).abs() < 1e-9);
    assert!(copies.contents.is_empty());
    assert!((copies.price - 250.0).abs() < 1e-9);
}

#[test]
fn missing_catalog_is_reported() {
    let market = market();
    let env: Env<'_, CatalogSnapshot, MarketSnapshot> = Env::new(None, Some(&market));
    assert_eq!(
        compute_profit(env, &ActionId::from("milking/cow"), &ProfitConfig::new(1.0)),
        Err(ProfitError::Oracle(OracleError::CatalogNotAvailable))
    );
}
