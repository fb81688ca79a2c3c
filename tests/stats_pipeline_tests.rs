use coursekit::{
    config::{Exemptions, GradingPolicy},
    stats::{self, Acknowledgement, PersonTotals, Projection, Roster, Standing, latest_acknowledgements},
};

fn line(n: u32, message: &str) -> String {
    format!("{n:040x} {message}")
}

/// Totals of one person with one submission per entry of `points`, starting
/// at unit 3.
fn totals(points: &[f64]) -> PersonTotals {
    let mut totals = PersonTotals::new("Alice");
    for (i, p) in points.iter().enumerate() {
        totals.add(&Acknowledgement::new(3 + i as u32, "Alice", Some(*p), 0.0));
    }
    totals
}

#[test]
fn newest_acknowledgement_wins() {
    let acks = vec![
        Acknowledgement::new(4, "Alice", Some(5.0), 0.0),
        Acknowledgement::new(4, "Bob", Some(2.0), 0.0),
        Acknowledgement::new(4, "Alice", Some(1.0), 0.0),
        Acknowledgement::new(5, "Alice", Some(3.0), 0.0),
        Acknowledgement::new(4, "alice", Some(6.0), 0.0),
    ];

    let latest: Vec<_> = latest_acknowledgements(acks).collect();
    assert_eq!(
        latest,
        vec![
            Acknowledgement::new(4, "Alice", Some(5.0), 0.0),
            Acknowledgement::new(4, "Bob", Some(2.0), 0.0),
            Acknowledgement::new(5, "Alice", Some(3.0), 0.0),
            Acknowledgement::new(4, "alice", Some(6.0), 0.0),
        ]
    );
}

#[test]
fn roster_totals_points_style_and_submissions() {
    let roster: Roster = vec![
        Acknowledgement::new(5, "Bob", Some(4.0), 1.0),
        Acknowledgement::new(4, "Bob", Some(3.5), 0.5),
        Acknowledgement::new(12, "Alice", Some(6.0), 0.0),
        Acknowledgement::new(2, "Zoe", None, 0.0),
    ]
    .into_iter()
    .collect();

    let names: Vec<_> = roster.people().map(PersonTotals::person).collect();
    assert_eq!(names, vec!["Alice", "Bob", "Zoe"]);
    assert_eq!(roster.max_unit(), 12);
    assert_eq!(roster.max_name_len(), 5);

    let bob = roster.get("Bob").expect("Bob");
    assert_eq!(bob.point_sum(), 7.5);
    assert_eq!(bob.style(), 1.5);
    assert_eq!(bob.submissions(), &[(5, 4.0), (4, 3.5)]);
    assert_eq!(bob.average(), 3.75);

    let zoe = roster.get("Zoe").expect("ungraded person still listed");
    assert_eq!(zoe.point_sum(), 0.0);
    assert_eq!(zoe.submission_count(), 0);
    assert_eq!(zoe.average(), 0.0);
}

#[test]
fn point_sum_matches_submissions() {
    let log = [
        line(1, "Corrected 6/Alice: 2.5 + 0.5 = 3"),
        line(2, "Corrected 5/Alice: 4.25"),
        line(3, "Corrected 6/Alice: 1"),
        line(4, "Imported Alice/4: 5.5 + 0 = 5.5"),
        line(5, "Corrected 3/Alice: 0 + 0 = 0"),
    ]
    .join("\n");

    let roster = stats::collect(&log, &GradingPolicy::default(), &Exemptions::default())
        .expect("collect");
    let alice = roster.get("Alice").expect("Alice");

    let sum: f64 = alice.submissions().iter().map(|(_, points)| points).sum();
    assert_eq!(alice.point_sum(), sum);
    assert_eq!(alice.point_sum(), 12.75);
    assert_eq!(alice.style(), 0.5);
    assert!(alice.submissions().iter().all(|(unit, _)| *unit != 3));
    assert_eq!(alice.submission_count(), 3);
}

#[test]
fn passed_is_inclusive_at_both_thresholds() {
    let policy = GradingPolicy::default();
    assert_eq!(policy.min_points(), 33.0);

    assert!(totals(&[4.0, 4.0, 4.0, 4.0, 4.0, 4.0, 3.0, 3.0, 3.0]).passed(&policy));
    assert!(!totals(&[4.0, 4.0, 4.0, 4.0, 4.0, 4.0, 3.0, 3.0, 2.9]).passed(&policy));
    assert!(!totals(&[6.0, 6.0, 6.0, 6.0, 6.0, 6.0, 6.0, 6.0]).passed(&policy));
}

#[test]
fn failing_on_submissions_even_if_points_are_reachable() {
    let policy = GradingPolicy::default();
    let alice = totals(&[4.0, 4.0, 4.0, 4.0, 4.0]);

    assert_eq!(alice.can_pass(&policy, 10), (false, true));
    let projection = Projection::new(&alice, &policy, 10);
    assert_eq!(projection.standing, Standing::Failed);
}

#[test]
fn passing_at_the_last_unit() {
    let policy = GradingPolicy::default();
    let alice = totals(&[4.0, 4.0, 4.0, 4.0, 4.0, 4.0, 3.0, 3.0, 3.0]);
    assert_eq!(Projection::new(&alice, &policy, 13).standing, Standing::Passed);
}

#[test]
fn submission_component_flips_at_the_boundary() {
    let policy = GradingPolicy::default();
    // 3 units remain after unit 10, 9 submissions are needed.
    assert!(totals(&[1.0; 6]).can_pass(&policy, 10).0);
    assert!(!totals(&[1.0; 5]).can_pass(&policy, 10).0);
}

#[test]
fn points_out_of_reach_fail() {
    let policy = GradingPolicy::default();
    let alice = totals(&[1.0; 8]);
    // 8 + 3 * 6 < 33
    assert_eq!(alice.can_pass(&policy, 10), (true, false));
    assert_eq!(Projection::new(&alice, &policy, 10).standing, Standing::Failed);
}

#[test]
fn low_average_is_unlikely_and_high_average_okay() {
    let policy = GradingPolicy::default();

    let unlikely = totals(&[3.0; 7]);
    let (average, may_pass) = unlikely.may_pass(&policy, 10);
    assert_eq!(average, 3.0);
    assert!(!may_pass);
    assert_eq!(Projection::new(&unlikely, &policy, 10).standing, Standing::Unlikely);

    let okay = totals(&[3.0; 8]);
    assert!(okay.may_pass(&policy, 10).1);
    assert_eq!(Projection::new(&okay, &policy, 10).standing, Standing::Okay);
}

#[test]
fn nobody_without_submissions_may_pass() {
    let policy = GradingPolicy::default();
    let empty = PersonTotals::new("Nobody");
    assert_eq!(empty.may_pass(&policy, 4), (0.0, false));
    assert_eq!(Projection::new(&empty, &policy, 4).standing, Standing::Unlikely);
}

#[test]
fn policy_thresholds_are_configurable() {
    let policy = GradingPolicy::builder()
        .min_submissions(2)
        .max_unit(4)
        .max_points(10.0)
        .pass_ratio(0.5)
        .build();
    let alice = totals(&[2.5, 2.5]);

    assert_eq!(policy.min_points(), 5.0);
    assert!(alice.passed(&policy));
    assert_eq!(policy.remaining_units(4), 0);
    assert_eq!(Standing::Passed.to_string(), "passed");
}
