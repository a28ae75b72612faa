//! Property tests over arbitrary entries.

use bloomslot::{AlignedByteFilter, PackedBitFilter};
use proptest::prelude::*;

fn entry_sets() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(any::<u8>(), 0..48), 0..64)
}

fn shape() -> impl Strategy<Value = (usize, u32)> {
    (6u32..14, 1u32..8).prop_map(|(exp, k)| (1usize << exp, k))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn inserted_entries_always_found((size, k) in shape(), entries in entry_sets()) {
        let packed = PackedBitFilter::new(size, k).unwrap();
        let aligned = AlignedByteFilter::new(size, k).unwrap();
        for entry in &entries {
            packed.insert(entry).unwrap();
            aligned.insert(entry).unwrap();
        }
        for entry in &entries {
            prop_assert!(packed.lookup(entry).unwrap());
            prop_assert!(aligned.lookup(entry).unwrap());
        }
    }

    #[test]
    fn marks_are_monotonic((size, k) in shape(), entries in entry_sets()) {
        let filter = PackedBitFilter::new(size, k).unwrap();
        let mut prev = filter.snapshot();
        for entry in &entries {
            filter.insert(entry).unwrap();
            let next = filter.snapshot();
            for (old, new) in prev.words().iter().zip(next.words()) {
                prop_assert_eq!(old & !new, 0, "a marked slot was cleared");
            }
            prev = next;
        }
    }

    #[test]
    fn roundtrip_preserves_every_slot((size, k) in shape(), entries in entry_sets()) {
        let filter = AlignedByteFilter::new(size, k).unwrap();
        filter.insert_batch(&entries).unwrap();

        let mut buf = Vec::new();
        filter.write_to(&mut buf).unwrap();
        let loaded = AlignedByteFilter::load_from(buf.as_slice()).unwrap();

        prop_assert_eq!(loaded.size(), size);
        prop_assert_eq!(loaded.hash_count(), k);
        prop_assert_eq!(loaded.snapshot(), filter.snapshot());
    }

    #[test]
    fn merge_is_idempotent_and_superset(
        (size, k) in shape(),
        ours in entry_sets(),
        theirs in entry_sets(),
    ) {
        let source = PackedBitFilter::new(size, k).unwrap();
        source.insert_batch(&theirs).unwrap();
        let mut buf = Vec::new();
        source.write_to(&mut buf).unwrap();

        let receiver = PackedBitFilter::new(size, k).unwrap();
        receiver.insert_batch(&ours).unwrap();
        receiver.merge_from(buf.as_slice()).unwrap();
        let once = receiver.snapshot();
        receiver.merge_from(buf.as_slice()).unwrap();
        prop_assert_eq!(receiver.snapshot(), once);

        for entry in ours.iter().chain(theirs.iter()) {
            prop_assert!(receiver.lookup(entry).unwrap());
        }
    }

    #[test]
    fn out_of_range_slots_rejected((size, k) in shape(), extra in 0usize..1024) {
        let filter = PackedBitFilter::new(size, k).unwrap();
        prop_assert!(filter.set_slot(size + extra).is_err());
        prop_assert!(filter.get_slot(size + extra).is_err());
        prop_assert_eq!(filter.count_ones(), 0);
    }
}
