use wgpu_lessons::{
    context::ComputeLimits,
    lessons::{
        compute_texture::{self, TEXTURE_HEIGHT, TEXTURE_WIDTH},
        particles::{self, PARTICLE_COUNT, SEED_EXTENT, seed_particles},
    },
    pipelines::compute::workgroups_for,
};

#[test]
fn should_round_workgroups_up() {
    assert_eq!(workgroups_for(1000, 10), 100);
    assert_eq!(workgroups_for(1001, 10), 101);
    assert_eq!(workgroups_for(1024, 64), 16);
    assert_eq!(workgroups_for(1, 64), 1);
    assert_eq!(workgroups_for(0, 64), 0);
    assert_eq!(workgroups_for(10, 0), 0);
}

#[test]
fn should_cover_the_whole_compute_texture() {
    let [x, y, z] = compute_texture::workgroups();
    assert_eq!([x, y, z], [100, 100, 1]);
    let [sx, sy, _] = compute_texture::WORKGROUP_SIZE;
    assert!(x * sx >= TEXTURE_WIDTH);
    assert!(y * sy >= TEXTURE_HEIGHT);
}

#[test]
fn should_cover_every_particle() {
    let groups = workgroups_for(PARTICLE_COUNT, particles::WORKGROUP_SIZE);
    assert!(groups * particles::WORKGROUP_SIZE >= PARTICLE_COUNT);
}

#[test]
fn should_fit_lesson_dispatches_into_default_limits() {
    let limits = ComputeLimits::from(&wgpu::Limits::default());
    assert!(limits.allows(
        compute_texture::workgroups(),
        compute_texture::WORKGROUP_SIZE
    ));
    assert!(limits.allows(
        [workgroups_for(PARTICLE_COUNT, particles::WORKGROUP_SIZE), 1, 1],
        [particles::WORKGROUP_SIZE, 1, 1]
    ));
}

#[test]
fn should_reject_oversized_dispatches() {
    let limits = ComputeLimits {
        max_workgroup_count: [65535; 3],
        max_workgroup_size: [256, 256, 64],
        max_invocations_per_workgroup: 256,
    };
    assert!(limits.allows([1, 1, 1], [16, 16, 1]));
    // too many invocations in one group
    assert!(!limits.allows([1, 1, 1], [32, 32, 1]));
    // z too large
    assert!(!limits.allows([1, 1, 1], [1, 1, 128]));
    // too many groups
    assert!(!limits.allows([65536, 1, 1], [1, 1, 1]));
}

#[test]
fn should_read_limits_from_wgpu() {
    let wgpu_limits = wgpu::Limits::default();
    let limits = ComputeLimits::from(&wgpu_limits);
    assert_eq!(
        limits.max_workgroup_count,
        [wgpu_limits.max_compute_workgroups_per_dimension; 3]
    );
    assert_eq!(
        limits.max_workgroup_size,
        [
            wgpu_limits.max_compute_workgroup_size_x,
            wgpu_limits.max_compute_workgroup_size_y,
            wgpu_limits.max_compute_workgroup_size_z
        ]
    );
    assert_eq!(
        limits.max_invocations_per_workgroup,
        wgpu_limits.max_compute_invocations_per_workgroup
    );
}

#[test]
fn should_seed_particles_inside_the_square() {
    let seeds = seed_particles(PARTICLE_COUNT);
    assert_eq!(seeds.len(), PARTICLE_COUNT as usize);
    for seed in &seeds {
        for c in seed.position {
            assert!((0.0..SEED_EXTENT).contains(&c), "{c} outside [0, 2)");
        }
    }
}

#[test]
fn should_seed_particles_deterministically() {
    assert_eq!(seed_particles(64), seed_particles(64));
    // a longer run starts with the shorter one
    assert_eq!(seed_particles(128)[..64], seed_particles(64)[..]);
}

#[test]
fn should_spread_seeds_over_every_quadrant() {
    let seeds = seed_particles(PARTICLE_COUNT);
    let mut quadrants = [0usize; 4];
    for seed in &seeds {
        let [x, y] = seed.position;
        let index = usize::from(x >= 1.0) + 2 * usize::from(y >= 1.0);
        quadrants[index] += 1;
    }
    // a low discrepancy sequence stays close to an even split
    for count in quadrants {
        assert!(count > 200 && count < 312, "{quadrants:?}");
    }
}
