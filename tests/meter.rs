use fraction::Fraction;
use metrum::{
    BeatInfo, MeterInfo, MetricalContext, MetricalError,
    Proportions, Signature,
};

#[test]
fn accented_positions_by_meter() {
    let four: MeterInfo = "4/4".parse().unwrap();
    assert_eq!(four.accented_positions(), vec![1, 3]);

    let seven: MeterInfo = "7/8".parse().unwrap();
    assert_eq!(
        seven.proportions(),
        &Proportions::from(vec![3, 2, 2])
    );
    assert_eq!(seven.accented_positions(), vec![1]);

    let five = MeterInfo::with_proportions(
        Signature::new(5, 8).unwrap(),
        vec![3, 2],
    )
    .unwrap();
    assert_eq!(five.accented_positions(), vec![1]);
}

#[test]
fn eight_eight_fractions() {
    let meter = MeterInfo::with_proportions(
        Signature::new(8, 8).unwrap(),
        vec![3, 3, 2],
    )
    .unwrap();
    assert_eq!(
        meter.fractions(true),
        vec![0.0, 0.375, 0.75, 1.0]
    );
    assert_eq!(
        meter.fractions_exact(true),
        vec![
            Fraction::new(0u64, 1u64),
            Fraction::new(3u64, 8u64),
            Fraction::new(3u64, 4u64),
            Fraction::new(1u64, 1u64),
        ]
    );
}

#[test]
fn beat_rescale_scenario() {
    let beat = BeatInfo::new(2, 0.5).unwrap();
    let fine = beat.rescale(2, false, true).unwrap();
    assert_eq!(fine.tatums(), 4);
    assert_eq!(fine.proportions(), &Proportions::Equal);
}

#[test]
fn rescale_inverse_law() {
    let beat = BeatInfo::new(3, 0.25).unwrap();
    for factor in [2, 3, 5] {
        let there_and_back = beat
            .rescale(factor, false, true)
            .unwrap()
            .rescale(factor, false, false)
            .unwrap();
        assert_eq!(there_and_back, beat);
    }
}

#[test]
fn signature_round_trip() {
    for text in ["4/4", "7/8", "3/4", "12/8"] {
        let signature: Signature = text.parse().unwrap();
        assert_eq!(signature.to_string(), text);
    }
}

#[test]
fn bar_length_estimates() {
    let swing_bar = MetricalContext::new(
        BeatInfo::new(2, 0.4).unwrap(),
        "6/8".parse().unwrap(),
    );
    assert_eq!(swing_bar.estimate_bar_length_sec(), 0.8);

    let additive = MetricalContext::new(
        BeatInfo::new(2, 0.4).unwrap(),
        MeterInfo::with_proportions(
            Signature::new(5, 8).unwrap(),
            vec![2, 3],
        )
        .unwrap(),
    );
    assert_eq!(additive.estimate_bar_length_sec(), 1.0);
}

#[test]
fn proportions_sum_is_enforced() {
    let signature = Signature::new(4, 4).unwrap();
    assert_eq!(
        MeterInfo::with_proportions(signature, vec![3, 3])
            .unwrap_err(),
        MetricalError::ProportionsSum {
            sum: 6,
            numerator: 4
        }
    );
}
