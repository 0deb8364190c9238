use criterion::{black_box, criterion_group, criterion_main, Criterion};
use note::buffer::Document;
use note::editor::{HistoryManager, HistoryRecorder};

fn benchmark_typing_with_history(c: &mut Criterion) {
    c.bench_function("typing_with_history", |b| {
        b.iter(|| {
            let history = HistoryRecorder::new();
            let mut document = Document::new();
            document.add_change_listener(Box::new(history.clone()));
            for _ in 0..1000 {
                document.insert_char(black_box('a'));
            }
            black_box(history.undo_len());
        });
    });
}

fn benchmark_undo_redo_cycle(c: &mut Criterion) {
    let snapshot = "a".repeat(10_000);

    c.bench_function("undo_redo_cycle", |b| {
        b.iter(|| {
            let mut history = HistoryManager::new();
            for _ in 0..100 {
                history.record_edit(snapshot.clone());
            }
            let mut current = snapshot.clone();
            while let Some(previous) = history.undo(current.clone()) {
                current = previous;
            }
            while let Some(next) = history.redo(current.clone()) {
                current = next;
            }
            black_box(current.len());
        });
    });
}

criterion_group!(benches, benchmark_typing_with_history, benchmark_undo_redo_cycle);
criterion_main!(benches);
