use criterion::{black_box, criterion_group, criterion_main, Criterion};

use reuse_planner::{
    compute_metrics, AppState, Logger, LoggingResult, LogEvent, LogSink, MemoryStore, PlanAction,
    Planner, PlannerConfig,
};

#[derive(Clone, Default)]
struct NullSink;

impl LogSink for NullSink {
    fn log(&self, _event: &LogEvent) -> LoggingResult<()> {
        Ok(())
    }
}

fn build_planner() -> Planner {
    let mut config = PlannerConfig::default();
    config.logger = Some(Logger::new(NullSink));
    config.enable_metrics();
    Planner::with_config(Box::new(MemoryStore::new()), config)
}

/// One pass through the planning flow: select, accept, place across the
/// grid, rotate and move survivors, remove the rest, read the metrics.
fn run_planning_script(planner: &mut Planner) {
    let material_ids = ["m1", "m2", "m3", "m7", "m20"];

    let mut column = 0u16;
    let mut placed_ids = Vec::new();
    for material_id in material_ids {
        let suggestions = planner.select_material(material_id);
        for suggestion in &suggestions {
            planner.accept_suggestion(suggestion.clone());
        }
        if let Some(suggestion) = suggestions.first() {
            if let Ok(item) = planner.place(suggestion, column, 0) {
                placed_ids.push(item.id);
            }
            column = (column + suggestion.footprint.w).min(9);
        }
    }

    for (index, id) in placed_ids.iter().enumerate() {
        if index % 2 == 0 {
            let _ = planner.rotate(id);
        } else {
            let _ = planner.move_item(id, 0, 6);
        }
    }
    for id in &placed_ids {
        planner.remove(id);
    }

    black_box(planner.compute_metrics());
}

fn planning_script(c: &mut Criterion) {
    c.bench_function("planning_script", |b| {
        b.iter(|| {
            let mut planner = build_planner();
            run_planning_script(&mut planner);
        });
    });
}

fn validation_sweep(c: &mut Criterion) {
    let mut planner = build_planner();
    let suggestions = planner.select_material("m1");
    let suggestion = suggestions[0].clone();
    planner.accept_suggestion(suggestion.clone());
    planner.place(&suggestion, 0, 0).expect("seed placement");
    let grid = planner.grid();
    let placed = planner.state().placed.clone();

    c.bench_function("validation_sweep", |b| {
        b.iter(|| {
            let mut accepted = 0u32;
            for x in 0..grid.cells() {
                for y in 0..grid.cells() {
                    let candidate = reuse_planner::Candidate {
                        x,
                        y,
                        footprint: suggestion.footprint,
                    };
                    if grid.validate(black_box(&placed), candidate, None).is_ok() {
                        accepted += 1;
                    }
                }
            }
            black_box(accepted);
        });
    });
}

fn metrics_snapshot(c: &mut Criterion) {
    let state = AppState::seed();
    c.bench_function("metrics_snapshot", |b| {
        b.iter(|| black_box(compute_metrics(black_box(&state))));
    });
}

// Exercise the action layer directly, without facade plumbing.
fn raw_transitions(c: &mut Criterion) {
    c.bench_function("raw_transitions", |b| {
        b.iter(|| {
            let mut state = AppState::seed();
            let grid = reuse_planner::Grid::default();
            let suggestions = reuse_planner::generate(&state.materials, "m1");
            for suggestion in &suggestions {
                let _ = reuse_planner::planner::actions::apply(
                    &mut state,
                    &grid,
                    PlanAction::AcceptSuggestion {
                        suggestion: suggestion.clone(),
                    },
                );
            }
            let _ = reuse_planner::planner::actions::apply(
                &mut state,
                &grid,
                PlanAction::Place {
                    suggestion: suggestions[0].clone(),
                    x: 0,
                    y: 0,
                },
            );
            black_box(&state);
        });
    });
}

criterion_group!(
    benches,
    planning_script,
    validation_sweep,
    metrics_snapshot,
    raw_transitions
);
criterion_main!(benches);
