use snake_content::ContentFactory;
use snake_core::{Acceleration, Direction, GameConfig, WeightedIndex};
use snake_runtime::{RunSummary, Simulation, StepOutcome};

fn factory() -> ContentFactory {
    ContentFactory::new(concat!(env!("CARGO_MANIFEST_DIR"), "/../game/content/data"))
}

fn arena(config: &GameConfig) -> Simulation {
    let (layout, behaviors) = factory().load_scenario("arena", config).unwrap();
    Simulation::seeded(layout, behaviors, config.clone()).unwrap()
}

#[test]
fn snake_spawns_on_bottom_floor_row() {
    // bundled config leaves the seed unpinned
    let config = factory().load_config().unwrap();
    assert_eq!(config.seed, None);
    let simulation = arena(&config);
    assert!(simulation.seed().is_some());
    let (_, y) = simulation.head_position();
    assert_eq!(y, 4);
    assert_eq!(simulation.direction(), Direction::Up);
    assert_eq!(simulation.acceleration(), Acceleration::Default);
}

/// Arena run with the snake spawned on column `x` of the bottom floor row.
fn run_up_from(x: u32) -> (RunSummary, Simulation) {
    let config = GameConfig {
        max_steps: 64,
        ..GameConfig::with_seed(1)
    };
    let (mut layout, behaviors) = factory().load_scenario("arena", &config).unwrap();
    let mut start = vec![0; layout.area()];
    start[layout.index_of(x, 4)] = 1;
    layout.snake_start = WeightedIndex::new(&start);

    let mut simulation = Simulation::seeded(layout, behaviors, config).unwrap();
    let summary = simulation.run(|_| None);
    (summary, simulation)
}

#[test]
fn heading_up_outcome_per_column() {
    for x in 0..8 {
        let (summary, simulation) = run_up_from(x);
        let cell = |x, y| simulation.layout().index_of(x, y);

        let expected = match x {
            // plain floor up to the top wall, dying on the fourth step
            0 | 1 | 3 | 5 | 7 => RunSummary {
                steps: 4,
                moves: 3,
                stops: 0,
                died: true,
                final_cell: cell(x, 1),
            },
            // rotor at (2, 1) sends the snake Right around row 1 forever
            2 => RunSummary {
                steps: 64,
                moves: 64,
                stops: 0,
                died: false,
                final_cell: cell(7, 1),
            },
            // tube at (4, 2) turns Up into Right, and Right back into Up one lap later
            4 => RunSummary {
                steps: 12,
                moves: 11,
                stops: 0,
                died: true,
                final_cell: cell(4, 1),
            },
            // gate at (6, 1) holds an upward snake for the rest of the run
            6 => RunSummary {
                steps: 64,
                moves: 2,
                stops: 62,
                died: false,
                final_cell: cell(6, 2),
            },
            _ => unreachable!(),
        };
        assert_eq!(summary, expected, "spawn column {x}");
    }

    let (_, accelerated) = run_up_from(1);
    assert_eq!(accelerated.acceleration(), Acceleration::Up);
    let (_, held) = run_up_from(6);
    assert_eq!(held.memory(held.layout().index_of(6, 3)), Some(1));
    assert_eq!(held.direction(), Direction::Up);
}

#[test]
fn same_seed_same_run() {
    let config = GameConfig::with_seed(77);
    let turns = |step: u32| match step % 6 {
        0 => Some(Direction::Left),
        3 => Some(Direction::Up),
        _ => None,
    };

    let first = arena(&config).run(turns);
    let second = arena(&config).run(turns);
    assert_eq!(first, second);
}

#[test]
fn top_wall_kills() {
    let config = factory().load_config().unwrap();
    let mut simulation = arena(&config);

    // slide along the bottom floor row to a column without gadgets
    while ![0, 3, 5, 7].contains(&simulation.head_position().0) {
        let outcome = simulation.step(Some(Direction::Left));
        assert!(matches!(outcome, StepOutcome::Moved { .. }), "{outcome:?}");
    }
    for _ in 0..3 {
        let outcome = simulation.step(Some(Direction::Up));
        assert!(matches!(outcome, StepOutcome::Moved { .. }), "{outcome:?}");
    }
    assert_eq!(simulation.head_position().1, 1);

    let outcome = simulation.step(None);
    assert!(matches!(outcome, StepOutcome::Died { cell } if cell < 8), "{outcome:?}");
    assert!(!simulation.is_alive());
}

#[test]
fn gate_stops_upward_snake() {
    let config = factory().load_config().unwrap();
    let mut simulation = arena(&config);

    while simulation.head_position().0 != 6 {
        simulation.step(Some(Direction::Right));
    }
    // counter plate at (6, 3), then floor, then the gate at (6, 1)
    assert!(matches!(
        simulation.step(Some(Direction::Up)),
        StepOutcome::Moved { .. }
    ));
    assert_eq!(simulation.memory(simulation.head()), Some(1));
    simulation.step(None);
    assert_eq!(
        simulation.step(None),
        StepOutcome::Stopped {
            cell: simulation.layout().index_of(6, 1)
        }
    );
}
