//! Tests for hyperparameter spaces.

use super::*;
use crate::render::PointSource;

fn range(name: &str, start: f64, end: f64, step: f64) -> ParamRange {
    ParamRange::new(name, start, end, step).unwrap()
}

fn space_of(ranges: impl IntoIterator<Item = ParamRange>) -> HyperSpace {
    HyperSpace::new(ranges).unwrap()
}

fn two_dim_space() -> HyperSpace {
    space_of([range(":A", 0.0, 1.0, 0.5), range(":B", -2.0, 2.0, 1.0)])
}

#[test]
fn test_size_is_product_of_expansions() {
    let space = two_dim_space();
    assert_eq!(space.size(), 15);
    assert_eq!(space.points().len(), 15);
}

#[test]
fn test_empty_space() {
    let space = HyperSpace::default();
    assert_eq!(space.size(), 0);
    assert!(space.points().is_empty());
    assert_eq!(space.point_at(0), None);
}

#[test]
fn test_run_ids_spaced_by_sample_count() {
    let space = space_of([range(":A", 0.0, 1.0, 0.5)])
        .with_sample_count(100)
        .unwrap()
        .with_run_start_id(0)
        .unwrap();

    let ids: Vec<u64> = space.points().iter().map(HyperPoint::run_start_id).collect();
    assert_eq!(ids, vec![0, 100, 200]);
}

#[test]
fn test_run_ids_start_at_base() {
    let space = two_dim_space()
        .with_sample_count(7)
        .unwrap()
        .with_run_start_id(1000)
        .unwrap();
    let points = space.points();
    assert_eq!(points[0].run_start_id(), 1000);
    for pair in points.windows(2) {
        assert_eq!(pair[1].run_start_id() - pair[0].run_start_id(), 7);
    }
    assert_eq!(space.run_id_count(), 15 * 7);
    assert_eq!(space.run_ids(), 1000..1105);
}

#[test]
fn test_points_are_reproducible() {
    let space = two_dim_space().with_sample_count(3).unwrap();
    let first = space.points();
    let second = space.points();
    assert_eq!(first, second);
    let names: Vec<String> = first.iter().map(HyperPoint::file_name).collect();
    let again: Vec<String> = second.iter().map(HyperPoint::file_name).collect();
    assert_eq!(names, again);
}

#[test]
fn test_enumeration_order_first_dimension_slowest() {
    let points = two_dim_space().points();
    assert_eq!(points[0].value_of(":A"), Ok(0.0));
    assert_eq!(points[0].value_of(":B"), Ok(-2.0));
    assert_eq!(points[1].value_of(":A"), Ok(0.0));
    assert_eq!(points[1].value_of(":B"), Ok(-1.0));
    assert_eq!(points[5].value_of(":A"), Ok(0.5));
    assert_eq!(points[5].value_of(":B"), Ok(-2.0));
}

#[test]
fn test_point_at_matches_points() {
    let space = two_dim_space().with_sample_count(4).unwrap();
    let points = space.points();
    for (i, point) in points.iter().enumerate() {
        assert_eq!(space.point_at(i).as_ref(), Some(point));
    }
    assert_eq!(space.point_at(points.len()), None);
}

#[test]
fn test_points_carry_space_metadata() {
    let space = two_dim_space()
        .with_sample_count(20)
        .unwrap()
        .with_model_label("ddm")
        .unwrap();
    for point in space.points() {
        assert_eq!(point.sample_count(), 20);
        assert_eq!(point.model_label(), "ddm");
        assert_eq!(point.dimension_names(), vec![":A", ":B"]);
    }
}

#[test]
fn test_set_dimension_upserts_in_place() {
    let mut space = two_dim_space();
    let replaced = space.set_dimension(range(":A", 0.0, 3.0, 1.0));
    assert_eq!(replaced, Ok(Some(range(":A", 0.0, 1.0, 0.5))));
    assert_eq!(space.dimension_names(), vec![":A", ":B"]);
    assert_eq!(space.size(), 20);

    assert_eq!(space.set_dimension(range(":C", 0.0, 1.0, 1.0)), Ok(None));
    assert_eq!(space.dimension_names(), vec![":A", ":B", ":C"]);
    assert_eq!(space.size(), 40);
}

#[test]
fn test_duplicate_ranges_in_constructor() {
    let space = space_of([range(":A", 0.0, 1.0, 0.5), range(":A", 0.0, 1.0, 1.0)]);
    assert_eq!(space.dimension_count(), 1);
    assert_eq!(space.size(), 2);
}

#[test]
fn test_remove_dimension() {
    let mut space = space_of([
        range(":A", 0.0, 1.0, 0.5),
        range(":B", 0.0, 1.0, 0.5),
        range(":C", 0.0, 1.0, 0.5),
    ]);
    space.remove_dimension(":B").unwrap();
    assert_eq!(space.dimension_names(), vec![":A", ":C"]);
    assert_eq!(
        space.remove_dimension(":B"),
        Err(UnknownDimensionError::new(":B"))
    );
}

#[test]
fn test_builder_validation() {
    assert_eq!(
        HyperSpace::default().with_sample_count(0),
        Err(SpaceError::ZeroSampleCount)
    );
    assert!(matches!(
        HyperSpace::default().with_model_label(""),
        Err(SpaceError::InvalidModelLabel(_))
    ));
    assert!(matches!(
        HyperSpace::default().with_model_label("a/b"),
        Err(SpaceError::InvalidModelLabel(_))
    ));
    assert!(matches!(
        HyperSpace::default().with_model_label("two words"),
        Err(SpaceError::InvalidModelLabel(_))
    ));
}

#[test]
fn test_cut_across_unknown_dimension() {
    let space = two_dim_space();
    assert_eq!(
        space.cut_across(":missing"),
        Err(UnknownDimensionError::new(":missing"))
    );
}

#[test]
fn test_cut_across_children() {
    let space = two_dim_space()
        .with_sample_count(10)
        .unwrap()
        .with_model_label("ddm")
        .unwrap();
    let children = space.cut_across(":A").unwrap();

    assert_eq!(children.len(), 3);
    let labels: Vec<&str> = children.iter().map(HyperSpace::model_label).collect();
    assert_eq!(labels, vec!["ddm_A_0.000", "ddm_A_0.500", "ddm_A_1.000"]);

    for (k, child) in children.iter().enumerate() {
        assert_eq!(child.size(), 5);
        assert!(child.dimension(":A").unwrap().is_pinned());
        assert_eq!(child.dimension_names(), vec![":A", ":B"]);
        assert_eq!(child.run_start_id(), k as u64 * 50);
    }
}

#[test]
fn test_cut_across_covers_parent_exactly_once() {
    let space = space_of([
        range(":A", 0.0, 1.0, 0.5),
        range(":B", -2.0, 2.0, 1.0),
        range(":C", 0.1, 0.35, 0.1),
    ]);

    for name in space.dimension_names() {
        let children = space.cut_across(name).unwrap();
        let union: Vec<HyperPoint> = children.iter().flat_map(HyperSpace::points).collect();
        assert_eq!(union.len(), space.size());

        for point in space.points() {
            let matches = union.iter().filter(|p| p.same_coordinates(&point)).count();
            assert_eq!(matches, 1, "{} in cut across {}", point, name);
        }
    }
}

#[test]
fn test_cut_across_run_ids_are_disjoint() {
    let space = two_dim_space().with_sample_count(3).unwrap();
    let mut ids: Vec<u64> = space
        .cut_across(":B")
        .unwrap()
        .iter()
        .flat_map(HyperSpace::points)
        .map(|p| p.run_start_id())
        .collect();
    ids.sort_unstable();
    let expected: Vec<u64> = (0..15).map(|i| i * 3).collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_cut_across_pinned_dimension() {
    let space = space_of([ParamRange::pinned(":A", 2.0).unwrap(), range(":B", 0.0, 1.0, 1.0)]);
    let children = space.cut_across(":A").unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].points().len(), 2);
}

#[test]
fn test_cut_across_all() {
    let space = two_dim_space().with_model_label("m").unwrap();
    let children = space.cut_across_all(&[":A", ":B"]).unwrap();
    assert_eq!(children.len(), 15);
    assert!(children.iter().all(|c| c.size() == 1));
    assert_eq!(children[0].model_label(), "m_A_0.000_B_-2.000");

    let none: [&str; 0] = [];
    assert_eq!(space.cut_across_all(&none).unwrap(), vec![space.clone()]);
    assert!(space.cut_across_all(&[":A", ":Z"]).is_err());
}

#[test]
fn test_divide_into_balanced() {
    let space = two_dim_space();
    let partitions = space.divide_into(4).unwrap();
    let sizes: Vec<usize> = partitions.iter().map(SpacePartition::len).collect();
    assert_eq!(sizes, vec![4, 4, 4, 3]);
    assert_eq!(partitions[1].span(), 4..8);
    assert_eq!(partitions[1].index(), 1);
}

#[test]
fn test_divide_into_covers_parent() {
    let space = two_dim_space().with_sample_count(5).unwrap();
    for n in 1..=20 {
        let partitions = space.divide_into(n).unwrap();
        assert_eq!(partitions.len(), n);

        let union: Vec<HyperPoint> = partitions.iter().flat_map(SpacePartition::points).collect();
        assert_eq!(union, space.points());

        let max = partitions.iter().map(SpacePartition::len).max().unwrap();
        let min = partitions.iter().map(SpacePartition::len).min().unwrap();
        assert!(max - min <= 1);
    }
}

#[test]
fn test_divide_into_more_partitions_than_points() {
    let space = space_of([range(":A", 0.0, 1.0, 0.5)]);
    let partitions = space.divide_into(5).unwrap();
    let sizes: Vec<usize> = partitions.iter().map(SpacePartition::len).collect();
    assert_eq!(sizes, vec![1, 1, 1, 0, 0]);
    assert!(partitions[4].is_empty());
    assert!(partitions[4].points().is_empty());
}

#[test]
fn test_divide_into_zero() {
    assert_eq!(two_dim_space().divide_into(0), Err(SpaceError::ZeroPartitions));
}

#[test]
fn test_partition_labels() {
    let space = two_dim_space().with_model_label("ddm").unwrap();
    let partitions = space.divide_into(2).unwrap();
    assert_eq!(partitions[0].label(), "ddm_part0");
    assert_eq!(partitions[1].label(), "ddm_part1");
    assert_eq!(PointSource::label(&space), "ddm");
}

#[test]
fn test_point_count_overflow_is_rejected() {
    let mut space = HyperSpace::default();
    for i in 0..3 {
        space
            .set_dimension(range(&format!(":d{i}"), 0.0, 99_999.0, 1.0))
            .unwrap();
    }
    assert_eq!(space.size(), 100_000usize.pow(3));

    let before = space.clone();
    assert_eq!(
        space.set_dimension(range(":d3", 0.0, 99_999.0, 1.0)),
        Err(SpaceError::TooManyPoints)
    );
    assert_eq!(space, before);

    let ranges = (0..5).map(|i| range(&format!(":d{i}"), 0.0, 99_999.0, 1.0));
    assert_eq!(HyperSpace::new(ranges), Err(SpaceError::TooManyPoints));
}

#[test]
fn test_run_id_overflow_is_rejected() {
    let err = two_dim_space().with_run_start_id(u64::MAX - 10).unwrap_err();
    assert_eq!(
        err,
        SpaceError::RunIdOverflow {
            run_start_id: u64::MAX - 10,
            sample_count: 1,
            points: 15,
        }
    );

    let late = two_dim_space().with_run_start_id(u64::MAX - 1499).unwrap();
    assert!(matches!(
        late.with_sample_count(100),
        Err(SpaceError::RunIdOverflow { sample_count: 100, .. })
    ));

    let mut space = two_dim_space()
        .with_sample_count(100)
        .unwrap()
        .with_run_start_id(u64::MAX - 1500)
        .unwrap();
    assert_eq!(space.points()[14].run_start_id(), u64::MAX - 100);
    assert_eq!(space.run_ids().end, u64::MAX);

    assert!(matches!(
        space.set_dimension(range(":C", 0.0, 1.0, 1.0)),
        Err(SpaceError::RunIdOverflow { .. })
    ));
    assert_eq!(space.dimension_count(), 2);
}
