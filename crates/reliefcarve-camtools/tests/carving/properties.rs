use proptest::prelude::*;
use reliefcarve_camtools::{
    DepthMapper, FootprintSampler, Heightmap, MotionEmitter, ScaleContext, SliceSchedule,
    ToolFootprint, Waypoint,
};
use reliefcarve_core::ReliefSpec;

fn heightmap_strategy() -> impl Strategy<Value = Heightmap> {
    (1u32..24, 1u32..24).prop_flat_map(|(w, h)| {
        proptest::collection::vec(any::<u8>(), (w * h) as usize)
            .prop_map(move |samples| Heightmap::from_samples(w, h, samples).unwrap())
    })
}

proptest! {
    #[test]
    fn depth_extremes_hit_relief_range(
        min_z in -5.0f64..5.0,
        span in 0.001f64..5.0,
        lo in 0u8..128,
        hi in 128u8..=255,
    ) {
        let relief = ReliefSpec { min_z, max_z: min_z + span, ..ReliefSpec::default() };
        let mapper = DepthMapper::new(&relief, lo, hi);
        prop_assert_eq!(mapper.relief_z(lo), relief.min_z);
        prop_assert_eq!(mapper.relief_z(hi), relief.max_z);
    }

    #[test]
    fn depth_is_monotonic(lo in 0u8..100, a in 100u8..=255, b in 100u8..=255) {
        let mapper = DepthMapper::new(&ReliefSpec::default(), lo, 255);
        let (a, b) = (a.min(b), a.max(b));
        prop_assert!(mapper.relief_z(a) <= mapper.relief_z(b));
    }

    #[test]
    fn final_slice_floor_is_relief_min(
        min_z in 0.0f64..1.0,
        extra in 0.01f64..4.0,
        carve_depth in 0.01f64..1.0,
        shave in 0.0f64..0.05,
    ) {
        let schedule = SliceSchedule::new(min_z + extra, min_z, carve_depth, shave);
        let slices: Vec<_> = schedule.iter().collect();
        prop_assert!(!slices.is_empty());
        prop_assert_eq!(slices.len() as u32, schedule.count());

        let last = slices.last().unwrap();
        prop_assert_eq!(last.floor, min_z);
        prop_assert_eq!(last.shave, 0.0);
        for pair in slices.windows(2) {
            prop_assert!(pair[1].floor < pair[0].floor);
        }
        // The first pass never starts above the block top.
        prop_assert!(slices[0].floor < min_z + extra);
    }

    #[test]
    fn footprint_covers_center(
        map in heightmap_strategy(),
        radius in 1u32..6,
        seed in any::<(u16, u16)>()
    ) {
        let cx = (seed.0 as u32 % map.width()) as i64;
        let cy = (seed.1 as u32 % map.height()) as i64;
        let fp = ToolFootprint::new(radius);
        let center = map.get(cx, cy).unwrap();
        prop_assert!(fp.max_height(&map, cx, cy) >= center);
    }

    #[test]
    fn footprint_off_image_is_minimum(map in heightmap_strategy(), radius in 0u32..6) {
        let fp = ToolFootprint::new(radius);
        let far = 1000;
        prop_assert_eq!(fp.max_height(&map, -far, -far), map.min());
        prop_assert_eq!(fp.max_height(&map, far, 0), map.min());
    }

    #[test]
    fn sampler_never_exceeds_map_max(
        map in heightmap_strategy(),
        x in -2.0f64..12.0,
        y in -2.0f64..7.0
    ) {
        let scale = ScaleContext::new(10.0, 5.0, map.width(), map.height());
        let sampler = FootprintSampler::new(&map, scale, 0.25);
        let value = sampler.max_height(x, y);
        prop_assert!(value >= map.min() && value <= map.max());
    }

    #[test]
    fn emitter_line_count_bounded(
        points in proptest::collection::vec((0i32..3, 0i32..3, 0i32..3), 1..40)
    ) {
        let mut emitter = MotionEmitter::new(Vec::new());
        let mut changes = 0u64;
        let mut last = None;
        for &(x, y, z) in &points {
            if last != Some((x, y, z)) {
                changes += 1;
            }
            last = Some((x, y, z));
            emitter.emit(&Waypoint::new(x as f64, y as f64, z as f64)).unwrap();
        }
        prop_assert_eq!(emitter.lines_written(), changes);
    }
}
