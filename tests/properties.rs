mod common;

use common::convert_single;
use lakefilter::{
    engine::{Domain, EngineType, EngineValue, Range, ValueSet},
    schema::DataType,
    ComparisonOp, Predicate, PredicateLeaf, PredicateVisitor,
};

/// Collects every leaf of a predicate.
#[derive(Default)]
struct Leaves(Vec<PredicateLeaf>);

impl PredicateVisitor for Leaves {
    type Error = ();
    type Value = ();

    fn visit_leaf(&mut self, leaf: &PredicateLeaf) -> Result<(), ()> {
        self.0.push(leaf.clone());
        Ok(())
    }

    fn combine_not(&mut self, _original: &Predicate, _child: ()) -> Result<(), ()> {
        Ok(())
    }

    fn combine_and(&mut self, _original: &Predicate, _children: Vec<()>) -> Result<(), ()> {
        Ok(())
    }

    fn combine_or(&mut self, _original: &Predicate, _children: Vec<()>) -> Result<(), ()> {
        Ok(())
    }
}

fn leaves(predicate: &Predicate) -> Vec<PredicateLeaf> {
    let mut leaves = Leaves::default();
    predicate.accept(&mut leaves).expect("collecting leaves");
    leaves.0
}

fn random_range(rng: &mut fastrand::Rng) -> Range {
    let low = rng.i64(-10_000..10_000);
    let high = low + rng.i64(1..1_000);
    match rng.u8(0..5) {
        0 => Range::less_than(high),
        1 => Range::less_than_or_equal(high),
        2 => Range::greater_than(low),
        3 => Range::greater_than_or_equal(low),
        _ => Range::range(low, rng.bool(), high, rng.bool()),
    }
}

#[test]
fn discrete_domains_never_produce_range_comparisons() {
    let mut rng = fastrand::Rng::with_seed(0x5eed);
    for _ in 0..500 {
        let len = rng.usize(1..8);
        let values: Vec<EngineValue> = (0..len)
            .map(|_| EngineValue::Long(rng.i64(-100_000..100_000)))
            .collect();
        let set = if rng.bool() {
            ValueSet::of(values)
        } else {
            ValueSet::excluding(values)
        };
        let domain = Domain::create(EngineType::BigInt, set, rng.bool());
        let predicate = convert_single(DataType::BigInt, domain).expect("constrained domain");

        for leaf in leaves(&predicate) {
            if let PredicateLeaf::Compare { op, .. } = leaf {
                assert!(!op.is_range(), "range comparison in {predicate}");
            }
        }
    }
}

#[test]
fn proper_ranges_never_produce_equality() {
    let mut rng = fastrand::Rng::with_seed(0xfeed);
    for _ in 0..500 {
        let ranges = (0..rng.usize(1..5))
            .map(|_| random_range(&mut rng))
            .collect();
        let domain = Domain::create(
            EngineType::BigInt,
            ValueSet::of_ranges(ranges),
            rng.bool(),
        );
        let predicate = convert_single(DataType::BigInt, domain).expect("constrained domain");

        for leaf in leaves(&predicate) {
            match leaf {
                PredicateLeaf::Compare { op, .. } => {
                    assert!(op.is_range(), "{op} in {predicate}")
                }
                PredicateLeaf::InList { .. } => panic!("membership test in {predicate}"),
                PredicateLeaf::IsNull { negated, .. } => assert!(!negated),
                PredicateLeaf::AlwaysFalse => panic!("unsatisfiable leaf in {predicate}"),
            }
        }
    }
}

#[test]
fn point_ranges_and_single_values_agree() {
    let mut rng = fastrand::Rng::with_seed(42);
    for _ in 0..200 {
        let value = rng.i64(i64::from(i32::MIN)..=i64::from(i32::MAX));
        let point = Domain::create(
            EngineType::Integer,
            ValueSet::of_ranges(vec![Range::equal(value)]),
            false,
        );
        let single = Domain::single_value(EngineType::Integer, value);
        let converted = convert_single(DataType::Int, point);
        assert_eq!(converted, convert_single(DataType::Int, single));
        assert!(matches!(
            converted.as_ref().map(Predicate::kind),
            Some(lakefilter::PredicateNode::Leaf(PredicateLeaf::Compare {
                op: ComparisonOp::Equal,
                ..
            }))
        ));
    }
}
