// SPDX-FileCopyrightText: © 2023 Foundation Devices, Inc. <hello@foundationdevices.com>
// SPDX-FileCopyrightText: © 2020 Dominik Spicher <dominikspicher@gmail.com>
// SPDX-License-Identifier: MIT

//! Fragment Chooser.

use crate::{
    collections::{Set, Vec},
    fountain::{sampler, sampler::BaseWeighted},
    xoshiro::Xoshiro256,
};

/// A fragment chooser.
#[cfg(feature = "alloc")]
pub type FragmentChooser = BaseFragmentChooser<Alloc>;

#[cfg(feature = "alloc")]
impl FragmentChooser {
    /// Construct a new [`FragmentChooser`].
    pub const fn new() -> Self {
        Self {
            sampler: sampler::Weighted::new(),
            indexes: alloc::vec::Vec::new(),
            shuffled: alloc::vec::Vec::new(),
        }
    }
}

/// A static fragment chooser.
pub type HeaplessFragmentChooser<const COUNT: usize> = BaseFragmentChooser<Heapless<COUNT>>;

impl<const COUNT: usize> HeaplessFragmentChooser<COUNT> {
    /// Construct a new [`HeaplessFragmentChooser`].
    pub const fn new() -> Self {
        Self {
            sampler: sampler::HeaplessWeighted::new(),
            indexes: heapless::Vec::new(),
            shuffled: heapless::Vec::new(),
        }
    }
}

/// Base fragment chooser.
#[derive(Default)]
pub struct BaseFragmentChooser<T: Types> {
    sampler: BaseWeighted<T::Sampler>,
    indexes: T::Indexes,
    shuffled: T::Shuffled,
}

impl<T: Types> BaseFragmentChooser<T> {
    /// Choose fragments from part data.
    ///
    /// # Panics
    ///
    /// This function panics if `sequence` or `sequence_count` are zero.
    pub fn choose_fragments<I>(&mut self, sequence: u32, sequence_count: u32, checksum: u32) -> I
    where
        I: Set<usize>,
    {
        assert!(sequence > 0 && sequence_count > 0);

        let mut set = I::default();
        if sequence <= sequence_count {
            set.insert((sequence - 1).try_into().unwrap())
                .expect("Not enough capacity to store single index");
            return set;
        }

        let seed = seed(sequence, checksum);
        let mut prng = Xoshiro256::from(seed.as_slice());

        let degree = choose_degree::<T>(&mut self.sampler, &mut prng, sequence_count);

        self.shuffled.clear();
        self.indexes.clear();
        self.indexes.reserve(sequence_count.try_into().unwrap());
        self.indexes.extend(0..sequence_count.try_into().unwrap());
        shuffle_indexes::<T>(&mut prng, &mut self.indexes, &mut self.shuffled, degree);

        set.extend(self.shuffled.iter().copied());
        set
    }
}

fn choose_degree<T: Types>(
    sampler: &mut BaseWeighted<T::Sampler>,
    prng: &mut Xoshiro256,
    sequence_count: u32,
) -> usize {
    sampler.set((0..sequence_count).map(|x| 1.0 / f64::from(x + 1)));
    usize::try_from(sampler.next(prng) + 1).unwrap()
}
///
/// # Errors
///
/// If serialization fails an error will be returned.

fn shuffle_indexes<T: Types>(
    prng: &mut Xoshiro256,
    indexes: &mut T::Indexes,
    shuffled: &mut T::Shuffled,
    degree: usize,
) {
    debug_assert!(degree <= indexes.len());

    shuffled.reserve(degree);
    while shuffled.len() < degree {
        let index = usize::try_from(prng.next_int(0, (indexes.len() - 1) as u64)).unwrap();
        let item = indexes.remove(index);
        shuffled.try_push(item).unwrap();
    }
}

fn seed(sequence: u32, checksum: u32) -> [u8; 8] {
    let mut seed = [0u8; 8];
    seed[0..4].copy_from_slice(&sequence.to_be_bytes());
    seed[4..8].copy_from_slice(&checksum.to_be_bytes());
    seed
}

/// Types for [`BaseFragmentChooser`].
pub trait Types: Default {
    /// Sampler types.
    type Sampler: sampler::Types;
    /// Indexes.
    type Indexes: Vec<usize>;
    /// Shuffled.
    type Shuffled: Vec<usize>;
}

/// [`alloc`] types for [`BaseFragmentChooser`].
#[cfg(feature = "alloc")]
#[derive(Default)]
pub struct Alloc;

#[cfg(feature = "alloc")]
impl Types for Alloc {
    type Sampler = sampler::Alloc;
    type Indexes = alloc::vec::Vec<usize>;
    type Shuffled = alloc::vec::Vec<usize>;
}

/// [`heapless`] types for [`BaseFragmentChooser`].
#[derive(Default)]
pub struct Heapless<const COUNT: usize>;

impl<const COUNT: usize> Types for Heapless<COUNT> {
    type Sampler = sampler::Heapless<COUNT>;
    type Indexes = heapless::Vec<usize, COUNT>;
    type Shuffled = heapless::Vec<usize, COUNT>;
}
