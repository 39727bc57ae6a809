use forager_core::{
    Controller, EpisodeRunner, EpisodeState, Experiment, GridWorld, MovementPolicy,
    NullVisualizer, Position, SimConfig,
};

fn manhattan(a: Position, b: Position) -> usize {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

#[test]
fn truncated_movement_never_reaches_food() {
    let config = SimConfig::default();
    let mut nn = Controller::from_config(&config);
    let mut world =
        GridWorld::with_positions(30, 10, Position::new(0, 0), Position::new(5, 0));
    let outcome = EpisodeRunner::new(&mut nn, &mut world, MovementPolicy::Truncate, 20)
        .run(&mut NullVisualizer);
    assert_eq!(outcome.state, EpisodeState::BudgetExhausted);
    assert_eq!(outcome.steps, 20);
}

#[test]
fn trained_controller_walks_straight_to_food() {
    let policy = MovementPolicy::ScaleShift;
    let food = Position::new(5, 0);
    let input = food.coords();
    // Agent left of the food on the same row: move +x, hold y.
    let target = policy.training_target([1.0, 0.0]);

    let mut nn = Controller::new(10, 0.5, 0.5, 0.01);
    let mut trained = false;
    for _ in 0..200_000 {
        let act = nn.forward(&input);
        if act.output[0] > 0.8 && (act.output[1] - 0.5).abs() < 0.1 {
            trained = true;
            break;
        }
        nn.update(&input, &act, &target);
    }
    assert!(trained, "controller failed to fit {:?}", nn.forward(&input).output);
    assert_eq!(policy.delta(&nn.forward(&input).output), (1, 0));

    let mut world = GridWorld::with_positions(30, 10, Position::new(0, 0), food);
    let mut runner = EpisodeRunner::new(&mut nn, &mut world, policy, 20);
    let mut distance = manhattan(runner.world().agent(), food);
    while !runner.step(&mut NullVisualizer).is_terminal() {
        let next = manhattan(runner.world().agent(), food);
        assert!(next < distance, "distance grew from {distance} to {next}");
        distance = next;
    }
    assert_eq!(runner.state(), EpisodeState::Arrived);
    assert!(runner.steps() <= 5, "took {} steps", runner.steps());
    assert_eq!(runner.world().agent(), food);
}

#[test]
fn seeded_batches_are_reproducible() {
    for movement in [MovementPolicy::Truncate, MovementPolicy::ScaleShift] {
        let config = SimConfig {
            seed: 11,
            simulations: 5,
            movement,
            ..SimConfig::default()
        };
        let mut first = Experiment::new(config.clone());
        let mut second = Experiment::new(config);
        let a = first.run(&mut NullVisualizer).unwrap();
        let b = second.run(&mut NullVisualizer).unwrap();
        assert_eq!(a.records, b.records);
        assert_eq!(a.records.len(), 5);
        assert_eq!(a.outcomes, b.outcomes);
        assert_eq!(a.trend, b.trend);
        assert_eq!(a.summary_line(), b.summary_line());
        assert_eq!(
            first.controller().weights_ih(),
            second.controller().weights_ih()
        );
    }
}

#[test]
fn records_stay_within_budget() {
    let config = SimConfig {
        seed: 3,
        simulations: 25,
        movement: MovementPolicy::ScaleShift,
        ..SimConfig::default()
    };
    let summary = Experiment::new(config).run(&mut NullVisualizer).unwrap();
    assert_eq!(summary.records.len(), 25);
    for outcome in &summary.outcomes {
        assert!(outcome.steps >= 1 && outcome.steps <= 20);
        if outcome.steps < 20 {
            assert_eq!(outcome.state, EpisodeState::Arrived);
        }
    }
    assert!(summary.trend.improvement.is_finite());
}
