#![no_main]

use gitdeck_git::parser::{BRANCH_LOG, COMMIT_DETAIL, LogFormat, parse_log};
use gitdeck_git::{CommitDetail, CommitSummary, GitRef};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    for format in [LogFormat::LEGACY, LogFormat::CONTROL] {
        if let Ok(records) = parse_log(text, &BRANCH_LOG, &format) {
            for record in &records {
                let _ = CommitSummary::try_from(record);
            }
        }
        if let Ok(records) = parse_log(text, &COMMIT_DETAIL, &format) {
            for record in &records {
                let _ = CommitDetail::try_from(record);
            }
        }
    }

    let _ = GitRef::parse(text);
});
