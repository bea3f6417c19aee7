//! One tree, many threads.

mod common;

use common::{random_rays, random_soup, rng};
use meshpick::{HitResult, KdTree};
use rayon::prelude::*;

#[test]
fn test_parallel_queries_match_sequential() {
    let mesh = random_soup(&mut rng(11), 2000);
    let tree = KdTree::build(&mesh.positions, &mesh.indices).unwrap();
    let rays = random_rays(&mut rng(12), 1024);

    let sequential: Vec<HitResult> = rays.iter().map(|ray| tree.nearest_hit(ray)).collect();
    let parallel: Vec<HitResult> = rays.par_iter().map(|ray| tree.nearest_hit(ray)).collect();

    assert_eq!(sequential, parallel);
    assert!(sequential.iter().any(HitResult::is_hit));
}

#[test]
fn test_per_thread_results_can_be_reused() {
    let mesh = random_soup(&mut rng(13), 1000);
    let tree = KdTree::build(&mesh.positions, &mesh.indices).unwrap();
    let rays = random_rays(&mut rng(14), 512);
    let expected: Vec<HitResult> = rays.iter().map(|ray| tree.nearest_hit(ray)).collect();

    let parallel: Vec<HitResult> = rays
        .par_chunks(64)
        .flat_map_iter(|chunk| {
            let mut scratch = HitResult::new();
            chunk
                .iter()
                .map(|ray| {
                    tree.nearest_hit_into(ray, &mut scratch);
                    scratch
                })
                .collect::<Vec<_>>()
        })
        .collect();

    assert_eq!(expected, parallel);
}

#[test]
fn test_tree_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<KdTree<'static>>();
}
