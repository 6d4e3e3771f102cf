use criterion::{criterion_group, criterion_main};

mod network {
    pub mod application {
        pub mod http {
            pub mod client;
        }
    }
}

criterion_group!(
    benches,
    network::application::http::client::bench_get,
    network::application::http::client::bench_post_with_auth,
    network::application::http::client::bench_wire_round_trip
);
criterion_main!(benches);
