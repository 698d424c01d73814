use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use std::sync::Arc;
use threadview_core::selector::PostListArgs;
use threadview_core::{Post, PostType, User, make_prepare_post_list};

const TIERS: [(&str, usize); 3] = [("small", 60), ("medium", 1_000), ("large", 20_000)];
const BASE: i64 = 1_709_251_200_000;

/// Newest-first channel history spread over several days, every 17th post a
/// join notification.
fn synthetic_posts(count: usize) -> Arc<[Post]> {
    (0..count)
        .rev()
        .map(|n| {
            let at = BASE + i64::try_from(n).unwrap_or(i64::MAX / 2) * 97_000;
            let author = if n % 3 == 0 { "me" } else { "other" };
            let post = Post::new(format!("post-{n}"), author, at).with_root("root-0");
            if n % 17 == 0 {
                post.with_type(PostType::JoinChannel)
            } else {
                post
            }
        })
        .collect()
}

fn bench_selector(c: &mut Criterion) {
    let mut group = c.benchmark_group("selector");
    let user = Arc::new(User::new("me", "me"));

    for (name, count) in TIERS {
        let mut args = PostListArgs::new(synthetic_posts(count), Some(Arc::clone(&user)));
        args.last_viewed_at = Some(BASE + 86_400_000);
        args.indicate_new_messages = true;
        args.show_join_leave = false;
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("miss", name), &args, |b, args| {
            b.iter(|| {
                let mut selector = make_prepare_post_list();
                black_box(selector.select(args))
            });
        });

        group.bench_with_input(BenchmarkId::new("hit", name), &args, |b, args| {
            let mut selector = make_prepare_post_list();
            selector.select(args);
            b.iter(|| black_box(selector.select(args)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_selector);
criterion_main!(benches);
