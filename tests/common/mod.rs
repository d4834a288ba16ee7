#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};

/// Scratch directory for one CLI test; removed on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes UTF-8 `contents` under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        self.write_bytes(name, contents.as_bytes())
    }

    pub fn write_bytes(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, contents).expect("write temp file");
        path
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.temp_dir.path().join(name)).expect("read workspace file")
    }
}

/// Two-column upload in the layout the generator expects.
pub const BANK_UPLOAD: &str = "\
Tên cột,Giá trị mẫu
Ngân hàng,ACB
Ngày giao dịch,01/01/2025
Số tiền,1000
Số lượng,INT
";

pub const BANK_SQL: &str = "\
CREATE TABLE public.giao_dich (
    id SERIAL PRIMARY KEY,
    ngan_hang TEXT,
    ngay_giao_dich DATE,
    so_tien DOUBLE PRECISION,
    so_luong INTEGER
);
";
