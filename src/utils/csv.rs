/// 导入/导出使用的极简 CSV：逗号分隔、无引号转义
/// 名单文件由管理端自行生成，字段内不含逗号，不引入完整 CSV 解析

/// 解析为去空行、去首尾空白的单元格矩阵
pub fn parse_rows(content: &str) -> Vec<Vec<String>> {
    content
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(|l| l.split(',').map(|c| c.trim().to_string()).collect())
        .collect()
}

/// 首行首格等于期望表头时返回 1（数据起始行下标），否则返回 0
pub fn data_start_index(rows: &[Vec<String>], header: &str) -> usize {
    match rows.first().and_then(|r| r.first()) {
        Some(first) if first.eq_ignore_ascii_case(header) => 1,
        _ => 0,
    }
}

/// 单行序列化（导出用）
pub fn write_row(cells: &[&str]) -> String {
    cells.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rows_skips_blank_lines() {
        let rows = parse_rows("a,b,c\r\n\r\n d , e ,f\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["a", "b", "c"]);
        assert_eq!(rows[1], vec!["d", "e", "f"]);
    }

    #[test]
    fn test_data_start_index_detects_header() {
        let with_header = parse_rows("full_name,phone,code\nAlice,0900,A-1");
        assert_eq!(data_start_index(&with_header, "full_name"), 1);

        let without_header = parse_rows("Alice,0900,A-1");
        assert_eq!(data_start_index(&without_header, "full_name"), 0);

        assert_eq!(data_start_index(&[], "full_name"), 0);
    }

    #[test]
    fn test_write_row() {
        assert_eq!(write_row(&["1", "Giải Nhất", "CODE-1001", "Alice"]), "1,Giải Nhất,CODE-1001,Alice");
    }
}
