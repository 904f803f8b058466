//! Merkle root and inclusion proof tests

use chunkproof::{
    core::{
        hash::{hash_pair, sha256},
        types::{FileId, Hash},
    },
    proofs::{build_root, verify, MerkleTree, ProofStep, SegmentProof},
    storage::{Chunker, MemoryStore, RootStore, SegmentManifest, SegmentStore},
    ChunkProofError,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

fn leaves_for(data: &[u8], chunk_size: usize) -> Vec<Hash> {
    let store = MemoryStore::new();
    Chunker::new(chunk_size)
        .unwrap()
        .split_bytes(data, &FileId::new("t").unwrap(), &store)
        .unwrap()
        .leaf_digests
}

#[test]
fn test_abcdefghi_scenario() {
    let leaves = leaves_for(b"ABCDEFGHI", 4);
    assert_eq!(leaves, vec![sha256(b"ABCD"), sha256(b"EFGH"), sha256(b"I")]);

    let (l0, l1, l2) = (leaves[0], leaves[1], leaves[2]);
    let l2l2 = hash_pair(&l2, &l2);
    let root = hash_pair(&hash_pair(&l0, &l1), &l2l2);
    assert_eq!(build_root(&leaves).unwrap(), root);

    let tree = MerkleTree::build(&leaves).unwrap();
    let path = tree.proof(0).unwrap();
    assert_eq!(path, vec![ProofStep::new(l1, true), ProofStep::new(l2l2, true)]);
    assert!(verify(&root, &l0, &path).unwrap());
}

#[test]
fn test_empty_input_fails() {
    assert!(matches!(build_root(&[]), Err(ChunkProofError::EmptyInput)));
}

#[test]
fn test_single_leaf_identity() {
    let d = sha256(b"lonely segment");
    assert_eq!(build_root(&[d]).unwrap(), d);
    assert!(verify(&d, &d, &[]).unwrap());
}

#[rstest]
fn test_every_leaf_round_trips(#[values(1, 2, 3, 4, 5, 7, 8, 9, 16, 17, 31, 100)] n: usize) {
    let leaves: Vec<Hash> = (0..n).map(|i| sha256(&(i as u64).to_be_bytes())).collect();
    let tree = MerkleTree::build(&leaves).unwrap();
    let root = build_root(&leaves).unwrap();
    assert_eq!(tree.root(), root);

    for (i, leaf) in leaves.iter().enumerate() {
        let path = tree.proof(i).unwrap();
        assert_eq!(path.len(), tree.depth());
        assert!(verify(&root, leaf, &path).unwrap(), "leaf {i} of {n}");
    }
}

#[test]
fn test_tampered_segment_fails_closed() {
    let mut data = b"The quick brown fox jumps over the lazy dog".to_vec();
    let leaves = leaves_for(&data, 8);
    let tree = MerkleTree::build(&leaves).unwrap();
    let path = tree.proof(2).unwrap();

    data[17] ^= 0x01;
    let tampered = leaves_for(&data, 8);
    assert_ne!(tampered[2], leaves[2]);
    assert!(!verify(&tree.root(), &tampered[2], &path).unwrap());
    assert_ne!(build_root(&tampered).unwrap(), tree.root());
}

#[test]
fn test_flipping_any_side_flag_fails() {
    let leaves: Vec<Hash> = (0..6u8).map(|i| sha256(&[i])).collect();
    let tree = MerkleTree::build(&leaves).unwrap();

    for (i, leaf) in leaves.iter().enumerate() {
        let path = tree.proof(i).unwrap();
        for step in 0..path.len() {
            let mut flipped = path.clone();
            flipped[step].is_right_sibling = !flipped[step].is_right_sibling;
            // Duplicated nodes are their own sibling, so the flag cannot matter there
            if flipped[step].sibling == path_running_hash(leaf, &path[..step]).as_bytes() {
                continue;
            }
            assert!(
                !verify(&tree.root(), leaf, &flipped).unwrap(),
                "leaf {i} step {step}"
            );
        }
    }
}

fn path_running_hash(leaf: &Hash, steps: &[ProofStep]) -> Hash {
    steps.iter().fold(*leaf, |running, step| {
        let sibling = Hash::from_slice(&step.sibling).unwrap();
        if step.is_right_sibling {
            hash_pair(&running, &sibling)
        } else {
            hash_pair(&sibling, &running)
        }
    })
}

#[rstest]
#[case(0)]
#[case(31)]
#[case(33)]
#[case(64)]
fn test_malformed_sibling_length(#[case] len: usize) {
    let leaves: Vec<Hash> = (0..4u8).map(|i| sha256(&[i])).collect();
    let tree = MerkleTree::build(&leaves).unwrap();
    let mut path = tree.proof(1).unwrap();
    path[1].sibling = vec![0xee; len];

    assert!(matches!(
        verify(&tree.root(), &leaves[1], &path),
        Err(ChunkProofError::MalformedProof { .. })
    ));
}

#[test]
fn test_malformed_sibling_in_json_document() {
    let leaves: Vec<Hash> = (0..4u8).map(|i| sha256(&[i])).collect();
    let tree = MerkleTree::build(&leaves).unwrap();
    let proof = SegmentProof::from_tree(&tree, FileId::new("doc").unwrap(), 0).unwrap();

    let mut value: serde_json::Value = serde_json::from_str(&proof.to_json().unwrap()).unwrap();
    value["path"][0]["sibling"] = serde_json::Value::String("abcd".into());
    let parsed = SegmentProof::from_json(&value.to_string()).unwrap();

    assert!(matches!(
        parsed.verify(),
        Err(ChunkProofError::MalformedProof { .. })
    ));
}

#[test]
fn test_generate_from_store() {
    let store = MemoryStore::new();
    let id = FileId::new("stored.bin").unwrap();
    let data: Vec<u8> = (0..200u8).collect();
    let outcome = Chunker::new(16).unwrap().split_bytes(&data, &id, &store).unwrap();
    let root = build_root(&outcome.leaf_digests).unwrap();
    store.write_root(&id, &root).unwrap();
    store
        .write_manifest(&SegmentManifest {
            file_id: id.clone(),
            chunk_size: 16,
            segment_count: outcome.segment_count(),
            total_size: outcome.total_size,
            root: Some(root),
            created_at: chrono::Utc::now(),
        })
        .unwrap();

    for index in 0..outcome.segment_count() {
        let proof = SegmentProof::generate(&store, &id, index).unwrap();
        assert_eq!(proof.leaf, outcome.leaf_digests[index]);
        assert!(proof.verify_against(&root).unwrap());
    }

    assert!(matches!(
        SegmentProof::generate(&store, &id, outcome.segment_count()),
        Err(ChunkProofError::LeafIndexOutOfRange { .. })
    ));

    store.corrupt_segment(&id, 3, vec![0u8; 16]).unwrap();
    assert!(matches!(
        SegmentProof::generate(&store, &id, 0),
        Err(ChunkProofError::RootMismatch { .. })
    ));
}

proptest! {
    #[test]
    fn prop_build_root_is_deterministic(seeds in prop::collection::vec(any::<u64>(), 1..64)) {
        let leaves: Vec<Hash> = seeds.iter().map(|s| sha256(&s.to_le_bytes())).collect();
        prop_assert_eq!(build_root(&leaves).unwrap(), build_root(&leaves).unwrap());
    }

    #[test]
    fn prop_split_and_prove_round_trip(
        data in prop::collection::vec(any::<u8>(), 1..512),
        chunk_size in 1usize..64,
    ) {
        let leaves = leaves_for(&data, chunk_size);
        prop_assert_eq!(leaves.len(), (data.len() + chunk_size - 1) / chunk_size);

        let tree = MerkleTree::build(&leaves).unwrap();
        for (i, leaf) in leaves.iter().enumerate() {
            let path = tree.proof(i).unwrap();
            prop_assert!(verify(&tree.root(), leaf, &path).unwrap());
        }
    }
}
