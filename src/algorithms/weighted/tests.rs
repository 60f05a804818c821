//! End-to-end suite for the weighted on-time pipeline.

use super::*;
use crate::error::ErrorKind;
use crate::generate::InstanceGenerator;
use crate::job::Job;
use crate::loader::InstanceLoader;
use crate::metrics;
use crate::SchedulingAlgorithm;

fn jobs(triples: &[(u32, u64, u32)]) -> TaskSet {
    TaskSet::from_triples(triples.iter().copied())
}

fn exact(set: &TaskSet) -> ScheduleReport {
    WeightedOnTimeScheduler::default().solve(set).unwrap()
}

fn approx(set: &TaskSet, k: f64) -> ScheduleReport {
    WeightedOnTimeScheduler::new(SolverConfig::new().fptas(k))
        .solve(set)
        .unwrap()
}

/// Best on-time weight over all subsets, each run in EDD order.
fn brute_force_optimum(set: &TaskSet) -> u64 {
    let mut sorted: Vec<Job> = set.jobs().to_vec();
    sorted.sort_by_key(|j| (j.d(), j.id()));

    (0u32..(1 << sorted.len()))
        .filter_map(|mask| {
            let subset: Vec<Job> = sorted
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, j)| *j)
                .collect();
            metrics::is_on_time(&subset).then(|| subset.iter().map(|j| j.w()).sum())
        })
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod scenarios {
    use super::*;

    #[test]
    fn three_job_instance() {
        let report = exact(&jobs(&[(2, 10, 2), (1, 5, 2), (3, 1, 4)]));
        assert_eq!(report.on_time_bound, 2);
        assert_eq!(report.weight_budget, 15);
        // J1 and J2 share deadline 2 but need 3 time units together.
        assert_eq!(report.solution.profit(), 10);
        assert_eq!(report.solution.selected_ids(), vec![1]);
        assert_eq!(report.solution.tardy_weight(), 6);
    }

    #[test]
    fn shared_deadline_equal_to_total_keeps_everything() {
        let set = jobs(&[(2, 3, 10), (3, 4, 10), (1, 2, 10), (4, 6, 10)]);
        let report = exact(&set);
        assert_eq!(report.on_time_bound, 4);
        assert_eq!(report.weight_budget, 15);
        assert_eq!(report.solution.profit(), 15);
        assert_eq!(report.solution.len(), 4);
        assert!(report.solution.tardy().is_empty());
    }

    #[test]
    fn single_job_is_on_time() {
        let report = exact(&jobs(&[(3, 8, 3)]));
        assert_eq!(report.on_time_bound, 1);
        assert_eq!(report.weight_budget, 8);
        assert_eq!(report.solution.profit(), 8);
    }

    #[test]
    fn single_job_table_has_one_row() {
        let cfg = SolverConfig::new().verbose(true);
        let report = WeightedOnTimeScheduler::new(cfg)
            .solve(&jobs(&[(3, 8, 3)]))
            .unwrap();
        let table = report.table.expect("verbose run keeps the table");
        assert_eq!(table.lines().count(), 1);
    }

    #[test]
    fn no_job_can_be_on_time() {
        let report = exact(&jobs(&[(5, 3, 1), (6, 4, 2)]));
        assert_eq!(report.on_time_bound, 0);
        assert_eq!(report.weight_budget, 0);
        assert_eq!(report.solution.profit(), 0);
        assert!(report.solution.is_empty());
        assert_eq!(report.solution.tardy_weight(), 7);
    }

    #[test]
    fn heavy_job_beats_more_jobs() {
        // Two light jobs fit together, but the heavy one alone is worth more.
        let report = exact(&jobs(&[(1, 1, 2), (1, 1, 2), (2, 5, 2)]));
        assert_eq!(report.on_time_bound, 2);
        assert_eq!(report.solution.profit(), 5);
        assert_eq!(report.solution.selected_ids(), vec![3]);
    }

    #[test]
    fn heaviest_weights_left_tardy_do_not_overflow() {
        let report = exact(&jobs(&[(1, u64::MAX, 0), (1, u64::MAX, 0)]));
        assert_eq!(report.solution.profit(), 0);
        assert_eq!(report.solution.tardy_weight(), 2 * u128::from(u64::MAX));
        assert!(report.solution.to_string().contains("Tardy jobs: 2"));
    }

    #[test]
    fn bundled_mixed_instance_matches_exhaustive_search() {
        let set = InstanceLoader::new()
            .from_str(include_str!("../../../instances/mixed.txt"))
            .unwrap();
        let report = exact(&set);
        assert_eq!(report.solution.profit(), brute_force_optimum(&set));
    }

    #[test]
    fn input_is_not_modified() {
        let set = jobs(&[(3, 1, 9), (1, 5, 2), (2, 4, 4)]);
        let before = set.clone();
        exact(&set);
        assert_eq!(set, before);
    }

    #[test]
    fn trait_object_dispatch() {
        let algo: &dyn SchedulingAlgorithm = &WeightedOnTimeScheduler::default();
        let report = algo.schedule(&jobs(&[(1, 2, 1)])).unwrap();
        assert_eq!(report.solution.profit(), 2);
    }
}

#[cfg(test)]
mod verbose {
    use super::*;

    #[test]
    fn quiet_run_drops_the_table() {
        assert!(exact(&jobs(&[(1, 2, 3)])).table.is_none());
    }

    #[test]
    fn verbose_table_marks_infeasible_cells() {
        let cfg = SolverConfig::new().verbose(true);
        let report = WeightedOnTimeScheduler::new(cfg)
            .solve(&jobs(&[(2, 10, 2), (1, 5, 2), (3, 1, 4)]))
            .unwrap();
        let table = report.table.unwrap();
        assert_eq!(table.lines().count(), 3);
        assert!(table.contains('∞'));
        assert_eq!(table.lines().next().unwrap().split('\t').count(), 16);
    }
}

#[cfg(test)]
mod errors {
    use super::*;

    #[test]
    fn empty_set_is_input_error() {
        let err = WeightedOnTimeScheduler::default()
            .solve(&TaskSet::new())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputFormat);
    }

    #[test]
    fn zero_weight_is_input_error() {
        let err = WeightedOnTimeScheduler::default()
            .solve(&jobs(&[(1, 0, 1)]))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputFormat);
    }

    #[test]
    fn bad_factor_is_rejected_before_scaling() {
        let set = jobs(&[(1, 4, 1), (1, 6, 2)]);
        for k in [0.0, -1.0, 7.0, f64::NAN] {
            let err = WeightedOnTimeScheduler::new(SolverConfig::new().fptas(k))
                .solve(&set)
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ApproximationParameter);
        }
    }

    #[test]
    fn oversized_table_suggests_fptas() {
        let set = jobs(&[(1, 1_000_000, 5), (1, 1_000_000, 5)]);
        let cfg = SolverConfig::new().max_table_cells(1_000);
        let err = WeightedOnTimeScheduler::new(cfg.clone()).solve(&set).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputFormat);

        let report = WeightedOnTimeScheduler::new(cfg.fptas(10_000.0))
            .solve(&set)
            .unwrap();
        assert_eq!(report.solution.reported_profit(), 2_000_000.0);
    }
}

#[cfg(test)]
mod fptas_runs {
    use super::*;

    #[test]
    fn factor_one_is_exact() {
        let set = jobs(&[(4, 12, 5), (3, 7, 6), (2, 9, 8), (5, 20, 9)]);
        let a = exact(&set);
        let b = approx(&set, 1.0);
        assert_eq!(a.solution, b.solution);
        assert_eq!(a.weight_budget, b.weight_budget);
        assert!(b.epsilon.is_some());
        assert!(a.epsilon.is_none());
    }

    #[test]
    fn reported_profit_is_scaled_back() {
        let set = jobs(&[(1, 40, 3), (1, 30, 3), (5, 25, 4)]);
        let report = approx(&set, 10.0);
        // Scaled weights 4, 3, 2: the first two fit, the third does not.
        assert_eq!(report.solution.profit(), 7);
        assert_eq!(report.solution.reported_profit(), 70.0);
        assert_eq!(report.solution.true_profit(), 70);
        assert!((report.epsilon.unwrap() - 10.0 / (40.0 / 3.0)).abs() < 1e-12);
    }

    #[test]
    fn budget_shrinks_with_the_factor() {
        let set = InstanceGenerator::new(12).max_weight(1_000).generate(5);
        let exact_budget = exact(&set).weight_budget;
        let scaled_budget = approx(&set, 50.0).weight_budget;
        assert!(scaled_budget <= exact_budget / 50 + 12);
    }
}

#[cfg(test)]
mod properties {
    use super::*;
    use proptest::prelude::*;

    fn arb_jobs() -> impl Strategy<Value = TaskSet> {
        prop::collection::vec((1u32..=6, 1u64..=20, 0u32..=25), 1..=9)
            .prop_map(|triples| TaskSet::from_triples(triples))
    }

    proptest! {
        #[test]
        fn on_time_bound_never_exceeds_job_count(set in arb_jobs()) {
            let report = exact(&set);
            prop_assert!(report.on_time_bound <= set.len());
            prop_assert!(report.solution.len() <= report.on_time_bound);
        }

        #[test]
        fn budget_is_sum_of_heaviest_weights(set in arb_jobs()) {
            let report = exact(&set);
            let mut weights: Vec<u64> = set.iter().map(|j| j.w()).collect();
            weights.sort_unstable_by(|a, b| b.cmp(a));
            let expected: u64 = weights.iter().take(report.on_time_bound).sum();
            prop_assert_eq!(report.weight_budget, expected);
        }

        #[test]
        fn profit_is_optimal_and_consistent(set in arb_jobs()) {
            let report = exact(&set);
            let solution = &report.solution;
            prop_assert_eq!(solution.profit(), brute_force_optimum(&set));
            prop_assert_eq!(u128::from(solution.profit()), solution.true_profit());
            prop_assert!(solution.profit() <= report.weight_budget);
            prop_assert_eq!(solution.true_profit() + solution.tardy_weight(), set.total_weight());
        }

        #[test]
        fn every_selected_job_meets_its_deadline(set in arb_jobs()) {
            let report = exact(&set);
            for s in report.solution.scheduled() {
                prop_assert!(s.completion <= u64::from(s.job.d()));
            }
        }

        #[test]
        fn repeated_runs_agree(set in arb_jobs()) {
            prop_assert_eq!(exact(&set), exact(&set));
        }

        #[test]
        fn fptas_never_overestimates(set in arb_jobs(), frac in 0.0f64..1.0) {
            let k = 1.0 + frac * (set.max_weight() as f64 - 1.0);
            let approximate = approx(&set, k).solution.reported_profit();
            let optimum = exact(&set).solution.profit() as f64;
            prop_assert!(approximate <= optimum + 1e-9);
        }

        #[test]
        fn fptas_selection_is_feasible(set in arb_jobs(), k in 1.0f64..4.0) {
            prop_assume!(k <= set.max_weight() as f64);
            let solution = approx(&set, k).solution;
            prop_assert!(metrics::is_on_time(&solution.on_time_jobs()));
            prop_assert!(solution.reported_profit() <= solution.true_profit() as f64 + 1e-9);
        }
    }
}
