//! Integration tests for the TesterService tick: mode entry sequence,
//! rendering, continuity alert and degraded-mode handling.

use multitester::app::events::AppEvent;
use multitester::app::service::TesterService;
use multitester::config::MeterConfig;
use multitester::display::OHM_GLYPH;
use multitester::error::{BusError, Error, PinRole};
use multitester::fsm::{Mode, RoutingPins, build_mode_table};
use multitester::measure::{Acceptance, RangeChannel, Reading};

use crate::mock_hw::{Rig, Trace};

fn routing(mode: Mode) -> RoutingPins {
    build_mode_table()[mode as usize].routing
}

fn ch(i: u8) -> RangeChannel {
    RangeChannel::new(i).unwrap()
}

fn started(rig: &mut Rig) -> TesterService {
    let mut svc = TesterService::new(MeterConfig::default());
    svc.start(&mut rig.board, &mut rig.clock, &mut rig.sink);
    svc
}

fn tick(svc: &mut TesterService, rig: &mut Rig) -> multitester::app::service::TickReport {
    svc.tick(&mut rig.board, &mut rig.clock, &mut rig.sink)
}

fn chars(text: &str) -> Vec<Trace> {
    text.bytes().map(Trace::Char).collect()
}

fn blink_sequence() -> Vec<Trace> {
    let mut seq = Vec::new();
    for _ in 0..3 {
        seq.extend([
            Trace::Indicator(true),
            Trace::DelayMs(100),
            Trace::Indicator(false),
            Trace::DelayMs(100),
        ]);
    }
    seq
}

fn ohms(reading: Option<Reading>) -> u32 {
    match reading {
        Some(Reading::Resistance(m)) => m.ohms,
        other => panic!("expected resistance reading, got {:?}", other),
    }
}

// ── Boot ──────────────────────────────────────────────────────

#[test]
fn boot_in_resistance_draws_glyphs_without_blink_or_clear() {
    let mut rig = Rig::new();
    let svc = started(&mut rig);

    assert_eq!(svc.mode(), Mode::Resistance);
    assert_eq!(
        rig.drain(),
        vec![
            Trace::Routing(routing(Mode::Resistance)),
            Trace::Cursor(0x04),
            Trace::Char(b'.'),
            Trace::Cursor(0x46),
            Trace::Char(b'k'),
            Trace::Cursor(0x47),
            Trace::Char(OHM_GLYPH),
        ]
    );
    assert_eq!(rig.sink.events, vec![AppEvent::Started(Mode::Resistance)]);
}

#[test]
fn boot_with_voltage_switch_held_starts_in_voltage() {
    let mut rig = Rig::new();
    rig.board.press_voltage();
    let svc = started(&mut rig);

    assert_eq!(svc.mode(), Mode::Voltage);
    assert_eq!(
        rig.drain(),
        vec![
            Trace::Routing(routing(Mode::Voltage)),
            Trace::Range(Some(RangeChannel::VOLTAGE_DIVIDER)),
        ]
    );
}

#[test]
fn boot_switch_failure_falls_back_to_resistance() {
    let mut rig = Rig::new();
    rig.board.fail_switches = true;
    let svc = started(&mut rig);
    assert_eq!(svc.mode(), Mode::Resistance);
    assert!(rig
        .sink
        .events
        .contains(&AppEvent::Degraded(Error::Pin(PinRole::Switch))));
}

// ── Resistance cycle ──────────────────────────────────────────

#[test]
fn ten_kilohm_renders_and_stays_silent() {
    let mut rig = Rig::new();
    rig.board.dut_ohms = Some(10_000.0);
    let mut svc = started(&mut rig);

    let report = tick(&mut svc, &mut rig);
    assert_eq!(report.mode, Mode::Resistance);
    assert!(!report.transitioned);
    assert_eq!(ohms(report.reading), 9750);
    assert!(!report.alert_on);
    assert_eq!(report.error, None);
    assert_eq!(svc.range_channel(), ch(1));

    assert_eq!(rig.board.row(0), "0009.750");
    assert_eq!(rig.board.row(1), "      kΩ");
}

#[test]
fn steady_reading_costs_one_settle_and_no_loop_sleep() {
    let mut rig = Rig::new();
    rig.board.dut_ohms = Some(10_000.0);
    let mut svc = started(&mut rig);
    tick(&mut svc, &mut rig);
    rig.drain();

    tick(&mut svc, &mut rig);
    let mut expected = vec![
        Trace::Range(Some(ch(1))),
        Trace::DelayMs(100),
        Trace::Sample(16_384),
        Trace::Cursor(0x00),
    ];
    expected.extend(chars("0009"));
    expected.push(Trace::Cursor(0x05));
    expected.extend(chars("750"));
    expected.push(Trace::Alert(false));
    assert_eq!(rig.drain(), expected);
}

#[test]
fn continuity_alert_sounds_at_low_resistance() {
    let mut rig = Rig::new();
    rig.board.dut_ohms = Some(50.0);
    let mut svc = started(&mut rig);

    let report = tick(&mut svc, &mut rig);
    assert_eq!(ohms(report.reading), 49);
    assert!(report.alert_on);
    assert!(rig.board.alert);
    assert_eq!(rig.board.row(0), "0000.049");
}

#[test]
fn measured_event_carries_the_reading() {
    let mut rig = Rig::new();
    rig.board.dut_ohms = Some(10_000.0);
    let mut svc = started(&mut rig);
    let report = tick(&mut svc, &mut rig);

    let reading = report.reading.unwrap();
    assert_eq!(rig.sink.events.last(), Some(&AppEvent::Measured(reading)));
    if let Reading::Resistance(m) = reading {
        assert_eq!(m.acceptance, Acceptance::InWindow);
    }
}

// ── Mode transitions ──────────────────────────────────────────

#[test]
fn resistance_to_voltage_runs_entry_sequence_in_order() {
    let mut rig = Rig::new();
    rig.board.dut_ohms = Some(10_000.0);
    let mut svc = started(&mut rig);
    tick(&mut svc, &mut rig);
    rig.drain();

    rig.board.voltage_raw = 7287;
    rig.board.press_voltage();
    let report = tick(&mut svc, &mut rig);

    assert!(report.transitioned);
    assert_eq!(report.mode, Mode::Voltage);

    let mut expected = vec![
        Trace::Routing(routing(Mode::Voltage)),
        Trace::Range(Some(RangeChannel::VOLTAGE_DIVIDER)),
    ];
    expected.extend(blink_sequence());
    expected.extend([Trace::Clear, Trace::DelayMs(2), Trace::Sample(7287), Trace::Cursor(0)]);
    expected.extend(chars("+05.00V "));
    expected.push(Trace::Alert(false));
    assert_eq!(rig.drain(), expected);

    assert_eq!(rig.board.row(0), "+05.00V ");
    assert_eq!(rig.board.row(1), "        ");
    assert!(rig.sink.events.contains(&AppEvent::ModeChanged {
        from: Mode::Resistance,
        to: Mode::Voltage
    }));
}

#[test]
fn voltage_to_resistance_redraws_glyphs_before_measuring() {
    let mut rig = Rig::new();
    rig.board.press_voltage();
    let mut svc = started(&mut rig);
    tick(&mut svc, &mut rig);
    rig.drain();

    rig.board.dut_ohms = Some(10_000.0);
    rig.board.press_resistance();
    let report = tick(&mut svc, &mut rig);
    assert!(report.transitioned);
    assert_eq!(ohms(report.reading), 9750);

    let trace = rig.drain();
    assert_eq!(trace[0], Trace::Routing(routing(Mode::Resistance)));
    assert_eq!(&trace[1..13], blink_sequence().as_slice());
    let clear = trace.iter().position(|t| *t == Trace::Clear).unwrap();
    let glyph = trace.iter().position(|t| *t == Trace::Char(OHM_GLYPH)).unwrap();
    let first_sample = trace
        .iter()
        .position(|t| matches!(t, Trace::Sample(_)))
        .unwrap();
    assert!(clear < glyph && glyph < first_sample);
    assert_eq!(trace[clear + 1], Trace::DelayMs(2));
    assert_eq!(rig.board.row(0), "0009.750");
    assert_eq!(rig.board.row(1), "      kΩ");
}

#[test]
fn released_switches_keep_voltage_mode() {
    let mut rig = Rig::new();
    rig.board.press_voltage();
    let mut svc = started(&mut rig);
    rig.board.release();
    rig.drain();

    let report = tick(&mut svc, &mut rig);
    assert!(!report.transitioned);
    assert_eq!(report.mode, Mode::Voltage);
    assert!(!rig.drain().iter().any(|t| matches!(t, Trace::Indicator(_))));
    assert_eq!(svc.transition_count(), 0);
}

#[test]
fn voltage_mode_silences_alert_regardless_of_last_resistance() {
    let mut rig = Rig::new();
    rig.board.dut_ohms = Some(50.0);
    let mut svc = started(&mut rig);
    assert!(tick(&mut svc, &mut rig).alert_on);

    rig.board.press_voltage();
    let report = tick(&mut svc, &mut rig);
    assert!(!report.alert_on);
    assert!(!rig.board.alert);
    assert!(matches!(report.reading, Some(Reading::Voltage(_))));
}

#[test]
fn negative_voltage_shows_minus_sign() {
    let mut rig = Rig::new();
    rig.board.press_voltage();
    rig.board.voltage_raw = -100;
    let mut svc = started(&mut rig);

    let report = tick(&mut svc, &mut rig);
    match report.reading {
        Some(Reading::Voltage(v)) => assert_eq!(v.millivolts, -69),
        other => panic!("expected voltage reading, got {:?}", other),
    }
    assert_eq!(rig.board.row(0), "-00.06V ");
}

// ── Degraded mode ─────────────────────────────────────────────

#[test]
fn adc_failure_abandons_cycle_and_keeps_outputs() {
    let mut rig = Rig::new();
    rig.board.dut_ohms = Some(10_000.0);
    let mut svc = started(&mut rig);
    tick(&mut svc, &mut rig);
    rig.drain();

    rig.board.dut_ohms = Some(50.0);
    rig.board.fail_adc = true;
    let report = tick(&mut svc, &mut rig);

    let adc_err = Error::Adc(BusError::NoAcknowledge);
    assert_eq!(report.reading, None);
    assert_eq!(report.error, Some(adc_err));
    assert!(!report.alert_on);
    assert_eq!(rig.board.row(0), "0009.750");
    assert!(!rig.drain().iter().any(|t| matches!(t, Trace::Alert(_))));
    assert_eq!(rig.sink.events.last(), Some(&AppEvent::Degraded(adc_err)));

    rig.board.fail_adc = false;
    let report = tick(&mut svc, &mut rig);
    assert_eq!(ohms(report.reading), 49);
    assert!(report.alert_on);
    assert_eq!(report.error, None);
}

#[test]
fn switch_failure_keeps_mode_and_still_measures() {
    let mut rig = Rig::new();
    rig.board.press_voltage();
    rig.board.voltage_raw = 7287;
    let mut svc = started(&mut rig);

    rig.board.fail_switches = true;
    let report = tick(&mut svc, &mut rig);
    assert_eq!(report.mode, Mode::Voltage);
    assert!(!report.transitioned);
    assert_eq!(report.error, Some(Error::Pin(PinRole::Switch)));
    assert!(matches!(report.reading, Some(Reading::Voltage(_))));
}

#[test]
fn display_failure_does_not_block_alert() {
    let mut rig = Rig::new();
    rig.board.dut_ohms = Some(50.0);
    let mut svc = started(&mut rig);

    rig.board.fail_display = true;
    let report = tick(&mut svc, &mut rig);
    assert_eq!(report.error, Some(Error::Display(BusError::NoAcknowledge)));
    assert_eq!(ohms(report.reading), 49);
    assert!(rig.board.alert);
}

#[test]
fn tick_counter_advances() {
    let mut rig = Rig::new();
    let mut svc = started(&mut rig);
    for _ in 0..5 {
        tick(&mut svc, &mut rig);
    }
    assert_eq!(svc.tick_count(), 5);
}
