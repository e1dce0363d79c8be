// Criterion benchmarks for Compass Match

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use compass_match::core::{rank, Matcher, ProposalSynthesizer, SkillSet};
use compass_match::models::{ClientRecord, UserProfile};

const SERVICES: [&str; 8] = [
    "React", "UI design", "Copywriting", "SEO", "Rust", "Brand strategy", "Video editing", "Data analysis",
];

fn create_client(id: usize) -> ClientRecord {
    let services = (0..(id % 4) + 1)
        .map(|offset| SERVICES[(id + offset) % SERVICES.len()].to_string())
        .collect();

    ClientRecord {
        id: id.to_string(),
        name: Some(format!("Client {}", id)),
        company: Some(format!("Company {}", id)),
        project_description: Some("marketing site rebuild".to_string()),
        services_needed: Some(services),
        ..Default::default()
    }
}

fn create_profile() -> UserProfile {
    UserProfile {
        id: "bench_user".to_string(),
        full_name: Some("Bench User".to_string()),
        email: Some("bench@example.com".to_string()),
        phone: Some("555-0100".to_string()),
        job_title: Some("Designer".to_string()),
        skills: Some("React, Design, Copywriting, Figma, Webflow".to_string()),
        services_offered: Some("Landing pages, Brand strategy".to_string()),
        work_history: Some("- Freelance designer since 2019".to_string()),
        rate_estimate: Some("$75/hr".to_string()),
    }
}

fn bench_tokenize(c: &mut Criterion) {
    let profile = create_profile();

    c.bench_function("skill_set_from_profile", |b| {
        b.iter(|| {
            SkillSet::from_profile_fields(
                black_box(profile.skills.as_deref()),
                black_box(profile.services_offered.as_deref()),
            )
        });
    });
}

fn bench_ranking(c: &mut Criterion) {
    let profile = create_profile();
    let tokens = SkillSet::from_profile_fields(
        profile.skills.as_deref(),
        profile.services_offered.as_deref(),
    );
    let matcher = Matcher::default();

    let mut group = c.benchmark_group("ranking");

    for client_count in [10, 100, 1000, 5000].iter() {
        let clients: Vec<ClientRecord> = (0..*client_count).map(create_client).collect();

        group.bench_with_input(BenchmarkId::new("rank", client_count), client_count, |b, _| {
            b.iter(|| rank(black_box(&tokens), black_box(&clients), black_box(20)));
        });

        group.bench_with_input(
            BenchmarkId::new("find_matches", client_count),
            client_count,
            |b, _| {
                b.iter(|| matcher.find_matches(black_box(&profile), black_box(&clients), None));
            },
        );
    }

    group.finish();
}

fn bench_synthesize(c: &mut Criterion) {
    let profile = create_profile();
    let client = create_client(3);
    let synthesizer = ProposalSynthesizer::default();

    c.bench_function("synthesize_proposal", |b| {
        b.iter(|| synthesizer.synthesize(black_box(&profile), black_box(&client)));
    });
}

criterion_group!(benches, bench_tokenize, bench_ranking, bench_synthesize);

criterion_main!(benches);
