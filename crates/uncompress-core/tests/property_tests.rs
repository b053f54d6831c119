//! Property-based tests for name handling and member decoding.

#![allow(clippy::unwrap_used)]

use std::io::Cursor;

use proptest::prelude::*;
use uncompress_core::ArchiveSource;
use uncompress_core::Decompressor;
use uncompress_core::UniformArchive;
use uncompress_core::test_utils::TarTestBuilder;
use uncompress_core::test_utils::gzip_bytes;
use uncompress_core::test_utils::xz_bytes;

fn open_tar(data: Vec<u8>) -> UniformArchive {
    UniformArchive::open(ArchiveSource::from_reader(Cursor::new(data))).unwrap()
}

proptest! {
    /// A single recognized suffix is removed and nothing else changes.
    #[test]
    fn prop_pure_name_strips_one_suffix(
        stem in "[a-z]{1,8}(/[a-z]{1,8}){0,2}(\\.[a-z]{1,3})?",
        suffix in prop::sample::select(vec!["gz", "bz2", "xz"]),
        repeat in 1usize..4,
    ) {
        let decompressor = Decompressor::default();
        let name = format!("{stem}{}", format!(".{suffix}").repeat(repeat));
        let expected = format!("{stem}{}", format!(".{suffix}").repeat(repeat - 1));
        prop_assert_eq!(decompressor.pure_name(&name), expected);
    }

    /// Names without a recognized suffix are returned unchanged.
    #[test]
    fn prop_pure_name_keeps_other_names(name in "[a-z]{1,8}(\\.(txt|tar|log|GZ|Xz))?") {
        let decompressor = Decompressor::default();
        prop_assert_eq!(decompressor.pure_name(&name), name);
    }

    /// Every listed file is also listed among all members.
    #[test]
    fn prop_list_files_subset_of_list(
        entries in prop::collection::vec(("[a-z]{1,6}", any::<bool>()), 1..12)
    ) {
        let mut builder = TarTestBuilder::new();
        for (i, (name, is_file)) in entries.iter().enumerate() {
            let name = format!("{name}{i}");
            builder = if *is_file {
                builder.add_file(&name, name.as_bytes())
            } else {
                builder.add_directory(&format!("{name}/"))
            };
        }
        let archive = open_tar(builder.build());

        let all = archive.list().unwrap();
        let files = archive.list_files().unwrap();
        prop_assert_eq!(all.len(), entries.len());
        prop_assert_eq!(files.len(), entries.iter().filter(|(_, f)| *f).count());
        for file in &files {
            prop_assert!(all.contains(file));
        }
    }

    /// Member bytes come back intact, whether stored plain or compressed.
    #[test]
    fn prop_member_bytes_survive(data in prop::collection::vec(any::<u8>(), 0..2048)) {
        let tar = TarTestBuilder::new()
            .add_file("plain.bin", &data)
            .add_file("packed.bin.gz", &gzip_bytes(&data))
            .add_file("packed.bin.xz", &xz_bytes(&data))
            .build();
        let mut archive = open_tar(tar);

        prop_assert_eq!(archive.read_to_vec("packed.bin.gz").unwrap(), data.clone());
        prop_assert_eq!(archive.read_to_vec("packed.bin.xz").unwrap(), data.clone());
        // Plain data starting with a codec magic may legitimately be decoded.
        let magic = data.get(..2);
        if !matches!(magic, Some([0x1f, 0x8b] | [b'B', b'Z'] | [0xfd, b'7'])) {
            prop_assert_eq!(archive.read_to_vec("plain.bin").unwrap(), data);
        }
    }
}
