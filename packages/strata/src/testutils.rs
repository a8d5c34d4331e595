//! Off-chain style tree building used by tests to publish roots and proofs.

use soroban_sdk::{BytesN, Env, Vec};

use crate::merkle::hash_pair;

fn next_level(env: &Env, level: &Vec<BytesN<32>>) -> Vec<BytesN<32>> {
    let mut next = Vec::new(env);
    let mut i = 0;
    while i < level.len() {
        if i + 1 < level.len() {
            next.push_back(hash_pair(env, &level.get_unchecked(i), &level.get_unchecked(i + 1)));
            i += 2;
        } else {
            // an unpaired node moves up unchanged
            next.push_back(level.get_unchecked(i));
            i += 1;
        }
    }
    next
}

pub fn merkle_root(env: &Env, leaves: &Vec<BytesN<32>>) -> BytesN<32> {
    if leaves.is_empty() {
        return BytesN::from_array(env, &[0u8; 32]);
    }

    let mut level = leaves.clone();
    while level.len() > 1 {
        level = next_level(env, &level);
    }
    level.get_unchecked(0)
}

pub fn merkle_proof(env: &Env, leaves: &Vec<BytesN<32>>, index: u32) -> Vec<BytesN<32>> {
    let mut proof = Vec::new(env);
    let mut level = leaves.clone();
    let mut position = index;

    while level.len() > 1 {
        let sibling = position ^ 1;
        if sibling < level.len() {
            proof.push_back(level.get_unchecked(sibling));
        }
        level = next_level(env, &level);
        position /= 2;
    }

    proof
}
