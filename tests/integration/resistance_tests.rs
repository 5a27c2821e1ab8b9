//! Auto-ranging search against the simulated divider.

use multitester::config::MeterConfig;
use multitester::error::{BusError, Error};
use multitester::measure::{Acceptance, RangeChannel, ResistanceMeter};
use multitester::measure::resistance::MAX_SEARCH_STEPS;

use crate::mock_hw::{Rig, Trace};

fn ch(i: u8) -> RangeChannel {
    RangeChannel::new(i).unwrap()
}

fn ranges(trace: &[Trace]) -> Vec<u8> {
    trace
        .iter()
        .filter_map(|t| match t {
            Trace::Range(Some(c)) => Some(c.index()),
            _ => None,
        })
        .collect()
}

#[test]
fn ten_kilohm_from_lowest_decade_steps_once() {
    let mut rig = Rig::new();
    rig.board.dut_ohms = Some(10_000.0);
    let mut meter = ResistanceMeter::new();

    let m = meter
        .measure(&mut rig.board, &mut rig.clock, &MeterConfig::default())
        .unwrap();
    assert_eq!(m.ohms, 9750);
    assert_eq!(m.channel, ch(1));
    assert_eq!(m.acceptance, Acceptance::InWindow);
    assert_eq!(ranges(&rig.drain()), vec![0, 1]);
}

#[test]
fn every_sample_follows_range_switch_and_settle() {
    let mut rig = Rig::new();
    rig.board.dut_ohms = Some(5_000_000.0);
    let mut meter = ResistanceMeter::new();
    meter
        .measure(&mut rig.board, &mut rig.clock, &MeterConfig::default())
        .unwrap();

    let trace = rig.drain();
    assert_eq!(Rig::samples(&trace), 4);
    for (i, t) in trace.iter().enumerate() {
        if matches!(t, Trace::Sample(_)) {
            assert!(matches!(trace[i - 2], Trace::Range(Some(_))));
            assert_eq!(trace[i - 1], Trace::DelayMs(100));
        }
    }
}

#[test]
fn five_megohm_accepts_at_upper_search_limit() {
    let mut rig = Rig::new();
    rig.board.dut_ohms = Some(5_000_000.0);
    let mut meter = ResistanceMeter::new();

    let m = meter
        .measure(&mut rig.board, &mut rig.clock, &MeterConfig::default())
        .unwrap();
    assert_eq!(m.channel, RangeChannel::MAX);
    assert_eq!(m.acceptance, Acceptance::SearchLimit);
    assert!(m.divider_mv <= 500.0);
    assert_eq!(ranges(&rig.drain()), vec![0, 1, 2, 3]);
}

#[test]
fn short_accepts_at_lower_search_limit() {
    let mut rig = Rig::new();
    rig.board.dut_ohms = Some(50.0);
    let mut meter = ResistanceMeter::new();

    let m = meter
        .measure(&mut rig.board, &mut rig.clock, &MeterConfig::default())
        .unwrap();
    assert_eq!(m.ohms, 49);
    assert_eq!(m.channel, RangeChannel::MIN);
    assert_eq!(m.acceptance, Acceptance::SearchLimit);
    assert_eq!(Rig::samples(&rig.drain()), 1);
}

#[test]
fn open_probes_saturate_at_top_decade() {
    let mut rig = Rig::new();
    let mut meter = ResistanceMeter::new();

    let m = meter
        .measure(&mut rig.board, &mut rig.clock, &MeterConfig::default())
        .unwrap();
    assert_eq!(m.channel, RangeChannel::MAX);
    assert_eq!(m.ohms, u32::MAX);
}

#[test]
fn channel_persists_between_calls() {
    let mut rig = Rig::new();
    rig.board.dut_ohms = Some(5_000_000.0);
    let mut meter = ResistanceMeter::new();
    let cfg = MeterConfig::default();

    meter.measure(&mut rig.board, &mut rig.clock, &cfg).unwrap();
    rig.drain();
    meter.measure(&mut rig.board, &mut rig.clock, &cfg).unwrap();
    assert_eq!(ranges(&rig.drain()), vec![3]);

    rig.board.dut_ohms = Some(10_000.0);
    let m = meter.measure(&mut rig.board, &mut rig.clock, &cfg).unwrap();
    assert_eq!(m.ohms, 9750);
    assert_eq!(ranges(&rig.drain()), vec![3, 2, 1]);
}

#[test]
fn oscillating_divider_stops_after_step_budget() {
    // 3.3 kΩ reads low on the 1 kΩ reference and high on the 10 kΩ one.
    let mut rig = Rig::new();
    rig.board.dut_ohms = Some(3_300.0);
    let mut meter = ResistanceMeter::new();

    let m = meter
        .measure(&mut rig.board, &mut rig.clock, &MeterConfig::default())
        .unwrap();
    assert_eq!(m.acceptance, Acceptance::StepBudget);
    assert_eq!(m.channel, ch(1));
    assert_eq!(ranges(&rig.drain()), vec![0, 1, 0, 1, 0, 1, 0, 1]);
    assert_eq!(MAX_SEARCH_STEPS, 8);
}

#[test]
fn adc_failure_propagates_and_keeps_channel() {
    let mut rig = Rig::new();
    rig.board.dut_ohms = Some(10_000.0);
    rig.board.fail_adc = true;
    let mut meter = ResistanceMeter::starting_at(ch(2));

    let res = meter.measure(&mut rig.board, &mut rig.clock, &MeterConfig::default());
    assert_eq!(res.err(), Some(Error::Adc(BusError::NoAcknowledge)));
    assert_eq!(meter.channel(), ch(2));
}
