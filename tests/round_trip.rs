use std::fs;
use std::io::Write;

use codelib::fs::{path_exists, recursive_mkdir};
use codelib::io::files_are_equal;
use codelib::{OwnedString, ZipContentInfo, ZipExtractor, unzip};

/// A scratch directory addressed with a trailing separator.
fn scratch() -> (tempfile::TempDir, String) {
    let dir = tempfile::Builder::new()
        .prefix("codelib-it-")
        .tempdir()
        .unwrap();
    let root = format!("{}/", dir.path().to_str().unwrap());
    (dir, root)
}

fn owned(s: &str) -> OwnedString {
    OwnedString::from_source(s).unwrap()
}

fn text(seed: usize, len: usize) -> Vec<u8> {
    let line = format!("line {seed}: the quick brown fox jumps over the lazy dog\r\n");
    line.bytes().cycle().take(len).collect()
}

fn unzip_into(archive: &str, output: &str) -> ZipContentInfo {
    let mut content = ZipContentInfo::new(&owned(archive));
    unzip(&mut content, &owned(output)).unwrap();
    content
}

fn recorded(content: &ZipContentInfo) -> Vec<String> {
    content
        .unzipped_file_paths()
        .iter()
        .map(|p| p.as_str().unwrap().to_owned())
        .collect()
}

#[test]
fn single_file_round_trip() {
    let (_guard, root) = scratch();
    let input = format!("{root}in/TextFile.txt");
    recursive_mkdir(&input).unwrap();
    fs::write(&input, text(1, 300)).unwrap();

    let archive = format!("{root}tmp/out.zip");
    codelib::zip(&archive, &[&input]).unwrap();
    assert!(path_exists(&archive));

    let output = format!("{root}tmp/out_unzipped/");
    let content = unzip_into(&archive, &output);

    assert_eq!(recorded(&content), [format!("{output}TextFile.txt")]);
    assert!(files_are_equal(&input, &format!("{output}TextFile.txt")).unwrap());
}

#[test]
fn multiple_text_files_round_trip() {
    let (_guard, root) = scratch();
    let source = format!("{root}MultiTextFileZip/");
    recursive_mkdir(&source).unwrap();

    let names = ["TextFileOne.txt", "TextFileTwo.txt", "ThirdTextFile.txt"];
    let inputs: Vec<String> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let path = format!("{source}{name}");
            fs::write(&path, text(i, 200 + i * 150)).unwrap();
            path
        })
        .collect();

    let archive = format!("{root}tmp/out.zip");
    codelib::zip(&archive, &inputs).unwrap();

    let output = format!("{root}tmp/out_unzipped/");
    let content = unzip_into(&archive, &output);

    assert_eq!(content.unzipped_file_count(), 3);
    for (input, name) in inputs.iter().zip(names) {
        let extracted = format!("{output}{name}");
        assert!(files_are_equal(input, &extracted).unwrap(), "{name}");
    }
}

#[test]
fn directory_structure_is_preserved() {
    let (_guard, root) = scratch();
    let source = format!("{root}src/Tree/");
    recursive_mkdir(&format!("{source}Nested/Deeper/")).unwrap();
    recursive_mkdir(&format!("{source}Empty/")).unwrap();
    fs::write(format!("{source}top.txt"), text(1, 500)).unwrap();
    fs::write(format!("{source}Nested/mid.bin"), [0u8, 1, 2, 0xff, b'\r', b'\n']).unwrap();
    fs::write(format!("{source}Nested/Deeper/leaf.txt"), text(2, 4000)).unwrap();

    let archive = format!("{root}tree.zip");
    codelib::zip(&archive, &[&source]).unwrap();

    let mut names: Vec<String> = ZipExtractor::open(&archive)
        .unwrap()
        .list_files()
        .unwrap()
        .into_iter()
        .map(|e| e.file_name)
        .collect();
    names.sort();
    assert_eq!(
        names,
        [
            "Tree/",
            "Tree/Empty/",
            "Tree/Nested/",
            "Tree/Nested/Deeper/",
            "Tree/Nested/Deeper/leaf.txt",
            "Tree/Nested/mid.bin",
            "Tree/top.txt",
        ]
    );

    let output = format!("{root}out/");
    let content = unzip_into(&archive, &output);
    assert_eq!(content.unzipped_file_count(), 7);
    for path in recorded(&content) {
        assert!(path_exists(&path), "{path}");
    }

    assert!(fs::metadata(format!("{output}Tree/Empty/")).unwrap().is_dir());
    for file in ["top.txt", "Nested/mid.bin", "Nested/Deeper/leaf.txt"] {
        assert!(
            files_are_equal(&format!("{source}{file}"), &format!("{output}Tree/{file}")).unwrap(),
            "{file}"
        );
    }
}

#[test]
fn files_and_directories_mix_in_one_archive() {
    let (_guard, root) = scratch();
    let single = format!("{root}single.txt");
    let dir = format!("{root}Folder/");
    recursive_mkdir(&dir).unwrap();
    fs::write(&single, text(3, 64)).unwrap();
    fs::write(format!("{dir}inner.txt"), text(4, 64)).unwrap();

    let archive = format!("{root}mixed.zip");
    codelib::zip(&archive, &[single.as_str(), dir.as_str()]).unwrap();

    let output = format!("{root}out/");
    let content = unzip_into(&archive, &output);
    assert_eq!(
        recorded(&content),
        [
            format!("{output}single.txt"),
            format!("{output}Folder/"),
            format!("{output}Folder/inner.txt"),
        ]
    );
}

#[test]
fn zero_byte_file_stays_a_file() {
    let (_guard, root) = scratch();
    let input = format!("{root}empty.txt");
    fs::write(&input, b"").unwrap();

    let archive = format!("{root}empty.zip");
    codelib::zip(&archive, &[&input]).unwrap();

    let entries = ZipExtractor::open(&archive).unwrap().list_files().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].file_name, "empty.txt");
    assert!(!entries[0].is_directory);

    let output = format!("{root}out/");
    unzip_into(&archive, &output);
    let metadata = fs::metadata(format!("{output}empty.txt")).unwrap();
    assert!(metadata.is_file());
    assert_eq!(metadata.len(), 0);
}

#[test]
fn relative_paths_round_trip() {
    let dir = tempfile::Builder::new()
        .prefix("codelib-rel-")
        .tempdir_in(".")
        .unwrap();
    let name = dir.path().file_name().unwrap().to_str().unwrap();
    let root = format!("./{name}/");

    let input = format!("{root}Data/");
    recursive_mkdir(&input).unwrap();
    fs::write(format!("{input}a.txt"), text(5, 100)).unwrap();

    let archive = format!("{root}tmp/rel.zip");
    codelib::zip(&archive, &[&input]).unwrap();

    let output = format!("{root}tmp/unzipped");
    let content = unzip_into(&archive, &output);
    assert_eq!(
        recorded(&content),
        [format!("{output}/Data/"), format!("{output}/Data/a.txt")]
    );
    assert!(files_are_equal(&format!("{input}a.txt"), &format!("{output}/Data/a.txt")).unwrap());
}

#[test]
fn raw_extraction_inflates_to_original() {
    let (_guard, root) = scratch();
    let data = text(6, 50_000);

    let archive = format!("{root}deflated.zip");
    {
        let mut writer = zip::ZipWriter::new(fs::File::create(&archive).unwrap());
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);
        writer.start_file("payload.txt", options).unwrap();
        writer.write_all(&data).unwrap();
        writer.finish().unwrap();
    }

    let output = format!("{root}raw/");
    let mut content = ZipContentInfo::new(&owned(&archive));
    ZipExtractor::open(&archive)
        .unwrap()
        .raw(true)
        .extract_all(&mut content, &output)
        .unwrap();

    let compressed = fs::read(format!("{output}payload.txt")).unwrap();
    assert!(compressed.len() < data.len());

    let mut restored = Vec::new();
    codelib::inflate(&mut compressed.as_slice(), &mut restored).unwrap();
    assert_eq!(restored, data);
}

#[test]
fn deflated_members_are_decompressed_by_default() {
    let (_guard, root) = scratch();
    let data = text(7, 20_000);

    let archive = format!("{root}deflated.zip");
    {
        let mut writer = zip::ZipWriter::new(fs::File::create(&archive).unwrap());
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);
        writer.add_directory("docs/", options).unwrap();
        writer.start_file("docs/readme.txt", options).unwrap();
        writer.write_all(&data).unwrap();
        writer.finish().unwrap();
    }

    let output = format!("{root}out/");
    let content = unzip_into(&archive, &output);
    assert_eq!(content.unzipped_file_count(), 2);
    assert_eq!(fs::read(format!("{output}docs/readme.txt")).unwrap(), data);
}

/// Streams `size` bytes of a repeating pattern to `path`.
fn write_large_file(path: &str, size: u64) {
    let chunk: Vec<u8> = (0..1024 * 1024u32).map(|i| (i % 251) as u8).collect();
    let mut file = fs::File::create(path).unwrap();
    let mut remaining = size;
    while remaining > 0 {
        let n = remaining.min(chunk.len() as u64) as usize;
        file.write_all(&chunk[..n]).unwrap();
        remaining -= n as u64;
    }
}

#[test]
#[ignore = "writes several gigabytes"]
fn multi_gigabyte_file_round_trip() {
    let (_guard, root) = scratch();
    let input = format!("{root}large.bin");
    write_large_file(&input, 6 * 1024 * 1024 * 1024);

    let archive = format!("{root}large.zip");
    codelib::zip(&archive, &[&input]).unwrap();

    let output = format!("{root}out/");
    unzip_into(&archive, &output);
    assert!(files_are_equal(&input, &format!("{output}large.bin")).unwrap());
}
