//! Merkle commitments over (asset, target weight) pairs.
//!
//! Leaves are double hashed so a 64-byte interior node can never be passed off as a
//! leaf. Interior nodes hash the sorted pair, which lets a proof be folded without
//! knowing whether each sibling sits on the left or the right.

use soroban_sdk::{xdr::ToXdr, Address, Bytes, BytesN, Env, Vec};

use crate::{
    error::{ErrorCode, StrataResult},
    validate,
};

fn keccak(env: &Env, data: &Bytes) -> BytesN<32> {
    env.crypto().keccak256(data).to_bytes()
}

fn leaf_preimage(env: &Env, asset: &Address, weight_bps: u32) -> Bytes {
    let mut data = asset.clone().to_xdr(env);
    data.extend_from_array(&weight_bps.to_be_bytes());
    data
}

/// `keccak(keccak(xdr(asset) || be32(weight_bps)))`
pub fn compute_leaf(env: &Env, asset: &Address, weight_bps: u32) -> BytesN<32> {
    let inner = keccak(env, &leaf_preimage(env, asset, weight_bps));
    keccak(env, &Bytes::from_array(env, &inner.to_array()))
}

/// Leaf that also authenticates the tier classifier and rank of the asset.
pub fn compute_tiered_leaf(
    env: &Env,
    asset: &Address,
    weight_bps: u32,
    tier: u32,
    rank: u32,
) -> BytesN<32> {
    let mut data = leaf_preimage(env, asset, weight_bps);
    data.extend_from_array(&tier.to_be_bytes());
    data.extend_from_array(&rank.to_be_bytes());

    let inner = keccak(env, &data);
    keccak(env, &Bytes::from_array(env, &inner.to_array()))
}

pub fn hash_pair(env: &Env, a: &BytesN<32>, b: &BytesN<32>) -> BytesN<32> {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

    let mut data = Bytes::from_array(env, &lo.to_array());
    data.extend_from_array(&hi.to_array());
    keccak(env, &data)
}

pub fn process_proof(env: &Env, leaf: BytesN<32>, proof: &Vec<BytesN<32>>) -> BytesN<32> {
    proof
        .iter()
        .fold(leaf, |node, sibling| hash_pair(env, &node, &sibling))
}

pub fn verify(
    env: &Env,
    root: &BytesN<32>,
    asset: &Address,
    weight_bps: u32,
    proof: &Vec<BytesN<32>>,
) -> bool {
    process_proof(env, compute_leaf(env, asset, weight_bps), proof) == *root
}

pub fn verify_tiered(
    env: &Env,
    root: &BytesN<32>,
    asset: &Address,
    weight_bps: u32,
    tier: u32,
    rank: u32,
    proof: &Vec<BytesN<32>>,
) -> bool {
    let leaf = compute_tiered_leaf(env, asset, weight_bps, tier, rank);
    process_proof(env, leaf, proof) == *root
}

/// Verifies every `(assets[i], weights[i], proofs[i])` triple, stopping at the first
/// failure.
pub fn verify_batch(
    env: &Env,
    root: &BytesN<32>,
    assets: &Vec<Address>,
    weights: &Vec<u32>,
    proofs: &Vec<Vec<BytesN<32>>>,
) -> StrataResult<bool> {
    validate!(
        env,
        assets.len() == weights.len() && assets.len() == proofs.len(),
        ErrorCode::ArrayLengthMismatch,
        "Merkle: Verify Batch: {} assets, {} weights, {} proofs",
        assets.len(),
        weights.len(),
        proofs.len()
    )?;

    for i in 0..assets.len() {
        let asset = assets.get_unchecked(i);
        let weight_bps = weights.get_unchecked(i);
        let proof = proofs.get_unchecked(i);
        if !verify(env, root, &asset, weight_bps, &proof) {
            return Ok(false);
        }
    }

    Ok(true)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testutils::{merkle_proof, merkle_root};
    use soroban_sdk::{testutils::Address as _, vec, Address, BytesN, Env, Vec};

    fn weighted_leaves(env: &Env, count: u32) -> (Vec<Address>, Vec<u32>, Vec<BytesN<32>>) {
        let mut assets = Vec::new(env);
        let mut weights = Vec::new(env);
        let mut leaves = Vec::new(env);
        for i in 0..count {
            let asset = Address::generate(env);
            let weight = 100 + i * 7;
            leaves.push_back(compute_leaf(env, &asset, weight));
            assets.push_back(asset);
            weights.push_back(weight);
        }
        (assets, weights, leaves)
    }

    #[test]
    fn hash_pair_is_order_independent() {
        let env = Env::default();
        let a = BytesN::from_array(&env, &[1u8; 32]);
        let b = BytesN::from_array(&env, &[9u8; 32]);
        assert_eq!(hash_pair(&env, &a, &b), hash_pair(&env, &b, &a));
        assert_ne!(hash_pair(&env, &a, &b), hash_pair(&env, &a, &a));
    }

    #[test]
    fn leaf_is_double_hashed() {
        let env = Env::default();
        let asset = Address::generate(&env);
        let single = keccak(&env, &leaf_preimage(&env, &asset, 250));
        let double = keccak(&env, &Bytes::from_array(&env, &single.to_array()));
        assert_eq!(compute_leaf(&env, &asset, 250), double);
    }

    #[test]
    fn every_leaf_of_odd_sized_tree_verifies() {
        let env = Env::default();
        env.cost_estimate().budget().reset_unlimited();
        let (assets, weights, leaves) = weighted_leaves(&env, 7);
        let root = merkle_root(&env, &leaves);

        for i in 0..assets.len() {
            let proof = merkle_proof(&env, &leaves, i);
            assert!(verify(
                &env,
                &root,
                &assets.get_unchecked(i),
                weights.get_unchecked(i),
                &proof
            ));
        }
    }

    #[test]
    fn corrupted_weight_or_proof_fails() {
        let env = Env::default();
        env.cost_estimate().budget().reset_unlimited();
        let (assets, weights, leaves) = weighted_leaves(&env, 4);
        let root = merkle_root(&env, &leaves);
        let asset = assets.get_unchecked(2);
        let weight = weights.get_unchecked(2);
        let proof = merkle_proof(&env, &leaves, 2);

        assert!(verify(&env, &root, &asset, weight, &proof));
        assert!(!verify(&env, &root, &asset, weight + 1, &proof));

        let unrelated = vec![&env, BytesN::from_array(&env, &[7u8; 32])];
        assert!(!verify(&env, &root, &asset, weight, &unrelated));
    }

    #[test]
    fn single_leaf_tree_has_empty_proof() {
        let env = Env::default();
        let asset = Address::generate(&env);
        let leaves = vec![&env, compute_leaf(&env, &asset, 10_000)];
        let root = merkle_root(&env, &leaves);

        assert_eq!(root, leaves.get_unchecked(0));
        assert!(verify(&env, &root, &asset, 10_000, &Vec::new(&env)));
    }

    #[test]
    fn tiered_leaf_binds_tier_and_rank() {
        let env = Env::default();
        env.cost_estimate().budget().reset_unlimited();
        let a = Address::generate(&env);
        let b = Address::generate(&env);
        let leaves = vec![
            &env,
            compute_tiered_leaf(&env, &a, 4_000, 1, 1),
            compute_tiered_leaf(&env, &b, 600, 2, 2),
        ];
        let root = merkle_root(&env, &leaves);
        let proof = merkle_proof(&env, &leaves, 0);

        assert!(verify_tiered(&env, &root, &a, 4_000, 1, 1, &proof));
        assert!(!verify_tiered(&env, &root, &a, 4_000, 2, 1, &proof));
        assert!(!verify_tiered(&env, &root, &a, 4_000, 1, 3, &proof));
        // the plain leaf of the same pair is a different commitment
        assert!(!verify(&env, &root, &a, 4_000, &proof));
    }

    #[test]
    fn batch_short_circuits_and_checks_lengths() {
        let env = Env::default();
        env.cost_estimate().budget().reset_unlimited();
        let (assets, weights, leaves) = weighted_leaves(&env, 3);
        let root = merkle_root(&env, &leaves);
        let mut proofs = Vec::new(&env);
        for i in 0..3 {
            proofs.push_back(merkle_proof(&env, &leaves, i));
        }

        assert_eq!(verify_batch(&env, &root, &assets, &weights, &proofs), Ok(true));

        let mut bad_weights = weights.clone();
        bad_weights.set(0, 1);
        assert_eq!(verify_batch(&env, &root, &assets, &bad_weights, &proofs), Ok(false));

        bad_weights.pop_back();
        assert_eq!(
            verify_batch(&env, &root, &assets, &bad_weights, &proofs),
            Err(ErrorCode::ArrayLengthMismatch)
        );
    }
}
