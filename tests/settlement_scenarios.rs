use daolette::{
    config::DaoletteConfig,
    errors::{ConfigurationError, MalformedBetError},
    games::{tables::BET_MIN, BetCategory, Outcome, OutcomeEngine},
    AccountKind, Address, BetEvent, DaoletteError, GameOutcome, InMemoryTreasury, Runtime,
    RuntimeFactory, TxContext,
};

const UNIT: u128 = 1_000_000_000_000_000_000;
const CAPITAL: u128 = 1_000 * UNIT;
const TIMESTAMP: u64 = 1_650_000_000_000_000;

fn alice() -> Address {
    Address::derive(AccountKind::EndUser, "alice")
}

fn runtime() -> Runtime<InMemoryTreasury> {
    RuntimeFactory::from_config(&DaoletteConfig::default()).expect("default config builds")
}

fn runtime_with(configure: impl FnOnce(&mut DaoletteConfig)) -> Runtime<InMemoryTreasury> {
    let mut config = DaoletteConfig::default();
    configure(&mut config);
    RuntimeFactory::from_config(&config).expect("config builds")
}

fn tx(fill: u8, value: u128) -> TxContext {
    TxContext::direct([fill; 32], TIMESTAMP, alice(), value)
}

#[test]
fn scenario_a_single_number_win_pays_twenty_times() {
    let mut runtime = runtime();
    let stake = 3 * UNIT / 10;
    assert!(stake <= runtime.get_bet_limit(1).unwrap());

    // sha3_256(hex(0x11 * 32) || block timestamp || "scenario-a") lands on residue 66670, slot 14
    let receipt = runtime.bet_on_numbers(&tx(0x11, stake), "15", "scenario-a").unwrap();

    assert_eq!(receipt.bet.category, BetCategory::SingleNumber);
    assert_eq!(receipt.draw.residue, 66_670);
    assert_eq!(receipt.draw.index, 14);
    assert_eq!(receipt.draw.outcome.value(), 15);
    assert_eq!(receipt.outcome, GameOutcome::Win);
    assert_eq!(receipt.payout, 20 * stake);

    let treasury = runtime.treasury();
    assert_eq!(treasury.balance(), CAPITAL + stake - 20 * stake);
    assert_eq!(treasury.payouts().len(), 1);
    assert_eq!(treasury.payouts()[0].recipient, alice());
}

#[test]
fn scenario_a_stake_above_single_number_ceiling_is_rejected() {
    let mut runtime = runtime();
    let ceiling = CAPITAL / 2_675;
    assert_eq!(runtime.get_bet_limit(1).unwrap(), ceiling);

    let result = runtime.bet_on_numbers(&tx(0x11, 5 * UNIT / 10), "15", "scenario-a");

    match result {
        Err(DaoletteError::StakeOutOfRange { stake, min, max }) => {
            assert_eq!(stake, 5 * UNIT / 10);
            assert_eq!(min, BET_MIN);
            assert_eq!(max, ceiling);
        }
        other => panic!("expected stake error, got {:?}", other),
    }
    assert_eq!(runtime.treasury().balance(), CAPITAL);
}

#[test]
fn uncovered_draw_loses_and_keeps_the_stake() {
    let mut runtime = runtime();
    let stake = 3 * UNIT / 10;

    let receipt = runtime.bet_on_numbers(&tx(0x11, stake), "9", "scenario-a").unwrap();

    assert_eq!(receipt.outcome, GameOutcome::Loss);
    assert_eq!(receipt.payout, 0);
    assert_eq!(receipt.gross_payout, 20 * stake);
    assert_eq!(runtime.treasury().balance(), CAPITAL + stake);
    assert!(runtime.treasury().payouts().is_empty());
}

#[test]
fn scenario_b_red_below_floor_moves_nothing() {
    let mut runtime = runtime();
    let stake = 5 * UNIT / 100;

    let result = runtime.bet_on_color(&tx(0x44, stake), true, "");

    match result {
        Err(DaoletteError::StakeOutOfRange { min, max, .. }) => {
            assert_eq!(min, BET_MIN);
            assert_eq!(max, CAPITAL / 147);
        }
        other => panic!("expected stake error, got {:?}", other),
    }
    assert_eq!(runtime.treasury().balance(), CAPITAL);
    assert_eq!(runtime.treasury().total_wagered(), 0);
    assert!(runtime.events().is_empty());
}

#[test]
fn scenario_c_insolvent_treasury_refuses_before_the_draw() {
    let mut runtime = runtime_with(|config| config.treasury.initial_balance = 2 * UNIT);
    let stake = 5 * UNIT / 10;
    assert!(stake <= runtime.get_bet_limit(4).unwrap());

    let result = runtime.bet_on_numbers(&tx(0x22, stake), "1,2,3,4", "scenario-c");

    match result {
        Err(DaoletteError::TreasuryInsufficientFunds { balance, payout }) => {
            // the forwarded stake counts toward the observed balance
            assert_eq!(balance, 2 * UNIT + stake);
            assert_eq!(payout, 2_585_625_000_000_000_000);
        }
        other => panic!("expected insolvency, got {:?}", other),
    }
    assert_eq!(runtime.treasury().balance(), 2 * UNIT);
    assert!(runtime.events().is_empty());
}

#[test]
fn scenario_d_inactive_game_refuses_every_entry_point() {
    let mut runtime = runtime_with(|config| config.game.start_active = false);

    let results = [
        runtime.bet_on_numbers(&tx(0x01, UNIT), "1,2", ""),
        runtime.bet_on_color(&tx(0x02, UNIT), false, ""),
        runtime.bet_on_parity(&tx(0x03, UNIT), true, ""),
    ];

    for result in results {
        assert!(matches!(result, Err(DaoletteError::GameInactive)));
    }
    assert_eq!(runtime.treasury().balance(), CAPITAL);
    assert!(runtime.events().is_empty());
}

#[test]
fn house_slot_beats_a_bet_on_every_number() {
    let mut runtime = runtime();
    let all = (1..=20).map(|n| n.to_string()).collect::<Vec<_>>().join(",");

    // residue 99225 maps to slot 20, the house slot
    let receipt = runtime.bet_on_numbers(&tx(0x11, UNIT), &all, "house-53").unwrap();

    assert_eq!(receipt.bet.breadth(), 20);
    assert_eq!(receipt.draw.outcome, Outcome::HOUSE);
    assert_eq!(receipt.outcome, GameOutcome::Loss);
    assert_eq!(receipt.gross_payout, 20_685 * UNIT / 20_000);
}

#[test]
fn successful_round_emits_records_in_order() {
    let mut runtime = runtime();
    let stake = 3 * UNIT / 10;

    let signed_at = TIMESTAMP - 2_000_000;
    let call = tx(0x11, stake).with_tx_timestamp(signed_at);
    runtime.bet_on_numbers(&call, "15", "scenario-a").unwrap();

    let events = runtime.events();
    assert_eq!(events.len(), 3);
    assert_eq!(
        events[0],
        BetEvent::BetSource {
            from: alice(),
            timestamp: signed_at
        }
    );
    assert_eq!(
        events[1],
        BetEvent::BetPlaced {
            amount: stake,
            numbers: "15".to_string()
        }
    );
    match &events[2] {
        BetEvent::BetResult {
            spin,
            winning_number,
            payout,
        } => {
            assert_eq!(spin, "0.6667");
            assert_eq!(winning_number.value(), 15);
            assert_eq!(*payout, 20 * stake);
        }
        other => panic!("unexpected record {:?}", other),
    }
}

#[test]
fn contract_caller_is_refused_and_refunded() {
    let mut runtime = runtime();
    let mut call = tx(0x55, UNIT);
    call.sender = Address::derive(AccountKind::Contract, "relay");

    let result = runtime.bet_on_parity(&call, true, "");

    assert!(matches!(result, Err(DaoletteError::CallerNotEligible(sender)) if sender.is_contract()));
    assert_eq!(runtime.treasury().balance(), CAPITAL);
    assert_eq!(runtime.treasury().total_wagered(), 0);
}

#[test]
fn malformed_lists_are_refused_in_both_orderings() {
    for preflight in [false, true] {
        let mut runtime = runtime_with(|config| config.game.preflight_validation = preflight);

        for (numbers, expected) in [
            ("", MalformedBetError::NoOutcomes),
            ("0,5", MalformedBetError::InvalidOutcome("0".to_string())),
            ("5,21", MalformedBetError::InvalidOutcome("21".to_string())),
            ("8,", MalformedBetError::InvalidOutcome(String::new())),
            ("1,,2", MalformedBetError::InvalidOutcome(String::new())),
        ] {
            let result = runtime.bet_on_numbers(&tx(0x66, UNIT / 10), numbers, "");
            match result {
                Err(DaoletteError::MalformedBet(err)) => assert_eq!(err, expected),
                other => panic!("expected malformed bet for {:?}, got {:?}", numbers, other),
            }
        }

        assert_eq!(runtime.treasury().balance(), CAPITAL);
        assert!(runtime.events().is_empty());
    }
}

#[test]
fn duplicate_entries_count_once() {
    let mut runtime = runtime();
    let stake = UNIT / 10;

    let receipt = runtime.bet_on_numbers(&tx(0x77, stake), "3,3,7, 7", "").unwrap();

    assert_eq!(receipt.bet.breadth(), 2);
    assert_eq!(receipt.gross_payout, 20_685 * stake / 2_000);
}

#[test]
fn group_list_on_generic_entry_point_is_limited_as_a_group() {
    let mut runtime = runtime();
    let group_ceiling = CAPITAL / 147;
    let ten_number_ceiling = CAPITAL / 500;
    assert!(group_ceiling > ten_number_ceiling);

    let receipt = runtime
        .bet_on_numbers(&tx(0x88, group_ceiling), "19,1,3,5,7,9,11,13,15,17", "")
        .unwrap();
    assert_eq!(receipt.bet.category, BetCategory::Parity);
    assert_eq!(receipt.gross_payout, 2 * group_ceiling);

    let result = runtime.bet_on_numbers(&tx(0x89, group_ceiling + 1), "2,4,6,8,10,12,14,16,18,20", "");
    assert!(matches!(result, Err(DaoletteError::StakeOutOfRange { .. })));
}

#[test]
fn draw_matches_independent_recomputation() {
    let mut runtime = runtime();
    let call = tx(0x33, UNIT);

    let receipt = runtime.bet_on_color(&call, false, "seed").unwrap();

    assert_eq!(receipt.draw, OutcomeEngine::compute(&call, "seed"));
    assert!(OutcomeEngine::verify(&call, "seed", &receipt.draw));
    assert_eq!(receipt.draw.residue, 61_735);
    assert_eq!(receipt.draw.outcome.value(), 14);
}

#[test]
fn limits_follow_live_treasury_capital() {
    let mut runtime = runtime();
    let before = runtime.get_bet_limit(10).unwrap();

    runtime.treasury_mut().set_minimum_capital(CAPITAL / 10);

    assert_eq!(before, CAPITAL / 500);
    assert_eq!(runtime.get_bet_limit(10).unwrap(), CAPITAL / 5_000);
    assert!(matches!(
        runtime.get_bet_limit(21),
        Err(DaoletteError::MalformedBet(MalformedBetError::BreadthOutOfRange(21)))
    ));
}

#[test]
fn admin_calls_are_owner_only() {
    let mut runtime = runtime();
    let owner = DaoletteConfig::default().game.owner;

    assert!(matches!(
        runtime.game_off(&alice()),
        Err(DaoletteError::Configuration(ConfigurationError::Unauthorized { .. }))
    ));
    assert!(runtime.state().is_game_active());

    runtime.game_off(&owner).unwrap();
    assert!(matches!(
        runtime.bet_on_color(&tx(0x99, UNIT), true, ""),
        Err(DaoletteError::GameInactive)
    ));

    runtime.game_on(&owner).unwrap();
    assert!(runtime.bet_on_color(&tx(0x99, UNIT), true, "").is_ok());
}

#[test]
fn multiplier_table_is_published_as_json() {
    let runtime = runtime();
    let table: serde_json::Value = serde_json::from_str(&runtime.get_multipliers()).unwrap();

    assert_eq!(table["bet_on_color"], 2);
    assert_eq!(table["bet_on_even_odd"], 2);
    assert_eq!(table["bet_on_number"], 20);
    assert_eq!(table["number_factor"], 20.685);
}
