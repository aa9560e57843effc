//! End-to-end optimizer scenarios over the in-memory repository and the
//! HiGHS backend.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use almoner::adapter::solver::HiGHSSolver;
use almoner::adapter::store::MemoryRepository;
use almoner::application::optimizer::{OptimizeOutcome, OptimizerService};
use almoner::config::{FairnessPolicy, ObjectiveMode, OptimizerConfig};
use almoner::domain::{
    Allocation, Child, Frequency, Gender, GenderRule, Requirement, Resource, ResourceKind,
};
use almoner::error::Result;
use almoner::port::{AllocationRepository, MilpProblem, MilpSolution, SolveStatus, Solver};

fn child(id: &str, gender: Gender) -> Child {
    Child::new(
        id,
        id,
        8,
        gender,
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
    )
}

fn config(objective: ObjectiveMode, fairness: FairnessPolicy) -> OptimizerConfig {
    OptimizerConfig {
        objective,
        fairness,
        solver_timeout_secs: 30,
    }
}

fn service(
    repository: Arc<MemoryRepository>,
    fairness: FairnessPolicy,
) -> OptimizerService<MemoryRepository> {
    OptimizerService::new(
        repository,
        Arc::new(HiGHSSolver::new()),
        config(ObjectiveMode::Cost, fairness),
    )
}

#[tokio::test]
async fn daily_food_scenario_allocates_minimums_and_estimates_exhaustion() {
    // 2 children, 100 kg of food, 2 kg/child daily requirement.
    let repo = Arc::new(MemoryRepository::seeded(
        vec![child("boy", Gender::Male), child("girl", Gender::Female)],
        vec![Resource::new(
            "Rice",
            ResourceKind::Food,
            dec!(100),
            "kg",
            dec!(1.25),
            GenderRule::All,
        )],
        vec![Requirement::new("Rice", dec!(2), Frequency::Daily)],
    ));
    let service = service(Arc::clone(&repo), FairnessPolicy::Full);

    let outcome = service.optimize().await.unwrap();
    let report = outcome.report().expect("expected an allocation");

    // Both children at least their 2 kg entitlement.
    assert_eq!(report.allocations.len(), 2);
    for allocation in &report.allocations {
        assert!(allocation.quantity >= dec!(1.999));
    }
    let total = report.total_for(&"Rice".into());
    assert!(total <= dec!(100));

    // Cost minimization stops at the floor: ~4 kg out, ~96 left, daily
    // need 4 kg => 24 days.
    let estimate = &report.exhaustion[0];
    assert_eq!(estimate.daily_rate, dec!(4));
    assert!((estimate.remaining - dec!(96)).abs() < dec!(0.01));
    assert_eq!(estimate.days_left, 24);

    // The store-backed flow persisted the new set.
    assert_eq!(repo.allocations().await.unwrap().len(), 2);
}

#[tokio::test]
async fn integral_clothing_is_whole_and_even() {
    // 3 children, 10 integral clothing units, 4 sets/child entitlement
    // capped by the even split of trunc(10/3) = 3.
    let repo = Arc::new(MemoryRepository::seeded(
        vec![
            child("a", Gender::Male),
            child("b", Gender::Female),
            child("c", Gender::Male),
        ],
        vec![Resource::new(
            "Uniforms",
            ResourceKind::Clothing,
            dec!(10),
            "sets",
            dec!(12),
            GenderRule::All,
        )],
        vec![Requirement::new("Uniforms", dec!(4), Frequency::Seasonal)],
    ));
    let service = service(repo, FairnessPolicy::Full);

    let outcome = service.optimize().await.unwrap();
    let report = outcome.report().expect("expected an allocation");

    assert_eq!(report.allocations.len(), 3);
    let quantities: Vec<Decimal> = report.allocations.iter().map(|a| a.quantity).collect();
    for q in &quantities {
        // Whole numbers only.
        assert_eq!(*q, q.trunc(), "integral allocation must be whole: {q}");
        assert!(*q >= dec!(3));
    }
    // No pair differs by more than one unit.
    let max = quantities.iter().max().unwrap();
    let min = quantities.iter().min().unwrap();
    assert!(max - min <= Decimal::ONE);
    // Capacity.
    assert!(quantities.iter().sum::<Decimal>() <= dec!(10));
}

#[tokio::test]
async fn gender_restricted_resource_excludes_other_gender() {
    let repo = Arc::new(MemoryRepository::seeded(
        vec![child("boy", Gender::Male), child("girl", Gender::Female)],
        vec![Resource::new(
            "Dresses",
            ResourceKind::Clothing,
            dec!(6),
            "pieces",
            dec!(9),
            GenderRule::FemaleOnly,
        )],
        vec![Requirement::new("Dresses", dec!(2), Frequency::Seasonal)],
    ));
    let service = service(repo, FairnessPolicy::Full);

    let outcome = service.optimize().await.unwrap();
    let report = outcome.report().expect("expected an allocation");

    assert!(report
        .allocations
        .iter()
        .all(|a| a.child.as_str() != "boy"));
    let girl_total: Decimal = report
        .allocations
        .iter()
        .filter(|a| a.child.as_str() == "girl")
        .map(|a| a.quantity)
        .sum();
    // Even split divides by the one eligible child, not both children.
    assert!(girl_total >= dec!(2));
}

#[tokio::test]
async fn mixed_resources_respect_all_invariants() {
    let children = vec![
        child("a", Gender::Male),
        child("b", Gender::Male),
        child("c", Gender::Female),
        child("d", Gender::Female),
    ];
    let resources = vec![
        Resource::new(
            "Maize",
            ResourceKind::Food,
            dec!(80),
            "kg",
            dec!(0.9),
            GenderRule::All,
        ),
        Resource::new(
            "Textbooks",
            ResourceKind::Education,
            dec!(9),
            "books",
            dec!(4),
            GenderRule::All,
        ),
        Resource::new(
            "Hygiene kits",
            ResourceKind::Medical,
            dec!(12),
            "kits",
            dec!(2.5),
            GenderRule::FemaleOnly,
        ),
    ];
    let requirements = vec![
        Requirement::new("Maize", dec!(1.5), Frequency::Daily),
        Requirement::new("Textbooks", dec!(2), Frequency::Monthly),
        Requirement::new("Hygiene kits", dec!(1), Frequency::Weekly),
    ];
    let repo = Arc::new(MemoryRepository::seeded(children, resources.clone(), requirements));
    let service = service(repo, FairnessPolicy::Full);

    let outcome = service.optimize().await.unwrap();
    let report = outcome.report().expect("expected an allocation");

    for resource in &resources {
        let total = report.total_for(&resource.id);
        assert!(
            total <= resource.quantity,
            "capacity violated for {}",
            resource.name
        );
    }
    for allocation in &report.allocations {
        if allocation.resource.as_str() == "Textbooks" {
            assert_eq!(allocation.quantity, allocation.quantity.trunc());
        }
        if allocation.resource.as_str() == "Hygiene kits" {
            let owner = ["c", "d"].contains(&allocation.child.as_str());
            assert!(owner, "male child received a female-only resource");
        }
    }
    // Every resource with a recurring requirement gets an estimate.
    assert_eq!(report.exhaustion.len(), 3);
    for estimate in &report.exhaustion {
        assert!(estimate.daily_rate > Decimal::ZERO);
    }
}

#[tokio::test]
async fn rerun_with_unchanged_inputs_reproduces_totals() {
    let repo = Arc::new(MemoryRepository::seeded(
        vec![
            child("a", Gender::Male),
            child("b", Gender::Female),
            child("c", Gender::Male),
        ],
        vec![Resource::new(
            "Rice",
            ResourceKind::Food,
            dec!(60),
            "kg",
            dec!(1),
            GenderRule::All,
        )],
        vec![Requirement::new("Rice", dec!(3), Frequency::Daily)],
    ));
    let service = service(Arc::clone(&repo), FairnessPolicy::Full);

    let first = service.optimize().await.unwrap();
    let first_total = first.report().unwrap().total_for(&"Rice".into());

    let second = service.optimize().await.unwrap();
    let second_total = second.report().unwrap().total_for(&"Rice".into());

    assert_eq!(first_total, second_total);
    assert_eq!(repo.allocations().await.unwrap().len(), 3);
}

#[tokio::test]
async fn continuous_fairness_band_holds() {
    let repo = Arc::new(MemoryRepository::seeded(
        vec![child("a", Gender::Male), child("b", Gender::Female)],
        vec![Resource::new(
            "Milk",
            ResourceKind::Food,
            dec!(40),
            "l",
            dec!(0.8),
            GenderRule::All,
        )],
        vec![Requirement::new("Milk", dec!(1), Frequency::Daily)],
    ));
    let service = service(repo, FairnessPolicy::Full);

    let outcome = service.optimize().await.unwrap();
    let report = outcome.report().expect("expected an allocation");

    let a = report
        .allocations
        .iter()
        .find(|x| x.child.as_str() == "a")
        .unwrap()
        .quantity;
    let b = report
        .allocations
        .iter()
        .find(|x| x.child.as_str() == "b")
        .unwrap()
        .quantity;
    assert!(a <= dec!(1.2) * b + dec!(0.001));
    assert!(a >= dec!(0.8) * b - dec!(0.001));
}

#[tokio::test]
async fn empty_population_yields_empty_allocation_set() {
    let repo = Arc::new(MemoryRepository::seeded(
        vec![],
        vec![Resource::new(
            "Rice",
            ResourceKind::Food,
            dec!(100),
            "kg",
            dec!(1),
            GenderRule::All,
        )],
        vec![Requirement::new("Rice", dec!(2), Frequency::Daily)],
    ));
    let service = service(Arc::clone(&repo), FairnessPolicy::Full);

    let outcome = service.optimize().await.unwrap();
    let report = outcome.report().expect("trivial case must succeed");
    assert!(report.allocations.is_empty());
    assert!(repo.allocations().await.unwrap().is_empty());
}

#[tokio::test]
async fn volume_objective_allocates_exactly_the_minimums() {
    let repo = Arc::new(MemoryRepository::seeded(
        vec![child("a", Gender::Male), child("b", Gender::Female)],
        vec![Resource::new(
            "Rice",
            ResourceKind::Food,
            dec!(100),
            "kg",
            dec!(0),
            GenderRule::All,
        )],
        vec![Requirement::new("Rice", dec!(2.5), Frequency::Daily)],
    ));
    // Volume mode: no cost signal, smallest feasible allocation.
    let service = OptimizerService::new(
        repo,
        Arc::new(HiGHSSolver::new()),
        config(ObjectiveMode::Volume, FairnessPolicy::Minimums),
    );

    let outcome = service.optimize().await.unwrap();
    let report = outcome.report().expect("expected an allocation");
    let total = report.total_for(&"Rice".into());
    assert!((total - dec!(5)).abs() < dec!(0.01), "total was {total}");
}

/// Stub backend with a scripted status, for exercising non-optimal paths.
struct ScriptedSolver(SolveStatus);

impl Solver for ScriptedSolver {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn solve(&self, _problem: &MilpProblem) -> Result<MilpSolution> {
        Ok(MilpSolution::with_status(self.0))
    }
}

#[tokio::test]
async fn infeasible_solve_leaves_previous_allocations_untouched() {
    let repo = Arc::new(MemoryRepository::seeded(
        vec![child("a", Gender::Male)],
        vec![Resource::new(
            "Rice",
            ResourceKind::Food,
            dec!(10),
            "kg",
            dec!(1),
            GenderRule::All,
        )],
        vec![],
    ));
    let previous = Allocation::dated(
        "a".into(),
        "Rice".into(),
        dec!(4),
        NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
    );
    repo.replace_allocations(vec![previous.clone()])
        .await
        .unwrap();

    let service = OptimizerService::new(
        Arc::clone(&repo),
        Arc::new(ScriptedSolver(SolveStatus::Infeasible)),
        config(ObjectiveMode::Cost, FairnessPolicy::Full),
    );

    let outcome = service.optimize().await.unwrap();
    match outcome {
        OptimizeOutcome::NotAllocated { status, reason } => {
            assert_eq!(status, SolveStatus::Infeasible);
            assert_eq!(reason, "no feasible allocation");
        }
        OptimizeOutcome::Allocated(_) => panic!("scripted infeasible solve must not allocate"),
    }

    let stored = repo.allocations().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, previous.id);
}

/// Backend that blocks long enough to trip the service timeout.
struct SlowSolver;

impl Solver for SlowSolver {
    fn name(&self) -> &'static str {
        "slow"
    }

    fn solve(&self, _problem: &MilpProblem) -> Result<MilpSolution> {
        std::thread::sleep(std::time::Duration::from_secs(5));
        Ok(MilpSolution::trivial())
    }
}

#[tokio::test]
async fn solver_timeout_is_reported_as_error_status() {
    let repo = Arc::new(MemoryRepository::seeded(
        vec![child("a", Gender::Male)],
        vec![Resource::new(
            "Rice",
            ResourceKind::Food,
            dec!(10),
            "kg",
            dec!(1),
            GenderRule::All,
        )],
        vec![],
    ));
    let service = OptimizerService::new(
        Arc::clone(&repo),
        Arc::new(SlowSolver),
        OptimizerConfig {
            objective: ObjectiveMode::Cost,
            fairness: FairnessPolicy::Full,
            solver_timeout_secs: 1,
        },
    );

    let outcome = service.optimize().await.unwrap();
    match outcome {
        OptimizeOutcome::NotAllocated { status, .. } => {
            assert_eq!(status, SolveStatus::Error);
        }
        OptimizeOutcome::Allocated(_) => panic!("timed-out solve must not allocate"),
    }
    assert!(repo.allocations().await.unwrap().is_empty());
}
