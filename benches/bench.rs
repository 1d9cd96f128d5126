// Criterion benchmarks for Matchmaker

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use matchmaker::core::{
    distance::great_circle_distance,
    filters::{CandidateQuery, Filter},
    recommender::sort_by_distance,
};
use matchmaker::models::{Coordinates, Gender, Recommendation, User};

fn create_candidate(id: usize, lat: f64, lon: f64) -> User {
    User {
        id: id as i64,
        name: format!("User {}", id),
        gender: match id % 3 {
            0 => Gender::Female,
            1 => Gender::Male,
            _ => Gender::Other,
        },
        latitude: lat,
        longitude: lon,
        diet_type: if id % 2 == 0 { "vegan" } else { "omnivore" }.to_string(),
        age: 18 + (id % 40) as i32,
    }
}

fn create_query() -> CandidateQuery {
    CandidateQuery {
        requester_id: 0,
        origin: Coordinates { latitude: 40.7128, longitude: -74.0060 },
        gender: Filter::Equals(Gender::Female),
        diet_type: Filter::Any,
        age: Filter::Between(21, 35),
        max_distance: Some(30.0),
    }
}

fn bench_great_circle_distance(c: &mut Criterion) {
    c.bench_function("great_circle_distance", |b| {
        b.iter(|| {
            great_circle_distance(
                black_box(40.7128),
                black_box(-74.0060),
                black_box(40.73061),
                black_box(-73.935242),
            )
        });
    });
}

fn bench_candidate_filtering(c: &mut Criterion) {
    let query = create_query();

    let mut group = c.benchmark_group("candidate_filtering");

    for candidate_count in [10, 100, 1000, 10000].iter() {
        let candidates: Vec<User> = (1..=*candidate_count)
            .map(|i| {
                let lat_offset = (i as f64 * 0.001) % 0.5;
                let lon_offset = (i as f64 * 0.0007) % 0.5;
                create_candidate(i, 40.7128 + lat_offset, -74.0060 + lon_offset)
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::new("evaluate_and_rank", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    let mut ranked: Vec<Recommendation> = candidates
                        .iter()
                        .filter_map(|user| {
                            query.evaluate(user).map(|distance| Recommendation {
                                user: user.clone(),
                                distance,
                            })
                        })
                        .collect();
                    sort_by_distance(&mut ranked);
                    black_box(ranked)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_great_circle_distance, bench_candidate_filtering);

criterion_main!(benches);
