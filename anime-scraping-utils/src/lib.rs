pub mod fs_util;
