use ballot_types::{ProgramId, PublicKey};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn proposal_address_bench(c: &mut Criterion) {
    let program = ProgramId::new([1u8; 32]);
    let proposer = PublicKey([2u8; 32]);

    c.bench_function("derive_proposal_address", |b| {
        b.iter(|| {
            ballot_crypto::derive_proposal_address(
                black_box(&program),
                black_box(&proposer),
                "Presidential election 2025",
            )
        })
    });
}

fn vote_address_bench(c: &mut Criterion) {
    let program = ProgramId::new([1u8; 32]);
    let voter = PublicKey([3u8; 32]);
    let (proposal, _) =
        ballot_crypto::derive_proposal_address(&program, &PublicKey([2u8; 32]), "t").unwrap();

    c.bench_function("derive_vote_address", |b| {
        b.iter(|| ballot_crypto::derive_vote_address(black_box(&program), &voter, &proposal))
    });
}

fn sign_verify_bench(c: &mut Criterion) {
    let kp = ballot_crypto::keypair_from_seed(&[5u8; 32]);
    let msg = [42u8; 256];
    let sig = ballot_crypto::sign_message(&msg, &kp.private);

    c.bench_function("ed25519_verify_256B", |b| {
        b.iter(|| ballot_crypto::verify_signature(black_box(&msg), &sig, &kp.public))
    });
}

criterion_group!(
    benches,
    proposal_address_bench,
    vote_address_bench,
    sign_verify_bench
);
criterion_main!(benches);
