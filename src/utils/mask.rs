/// 手机号脱敏：末三位替换为固定掩码 "xxx"
/// 抽奖结果越过信任边界（大屏展示）时必须使用；导出等管理端操作不脱敏
pub fn mask_phone(phone: &str) -> String {
    if phone.is_empty() {
        return String::new();
    }
    let chars: Vec<char> = phone.chars().collect();
    let keep = chars.len().saturating_sub(3);
    let prefix: String = chars[..keep].iter().collect();
    format!("{prefix}xxx")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_phone() {
        assert_eq!(mask_phone("0900000101"), "0900000xxx");
        assert_eq!(mask_phone("+12345678901"), "+12345678xxx");
        assert_eq!(mask_phone(""), "");
    }

    #[test]
    fn test_mask_phone_short() {
        // 过短的号码整体脱敏
        assert_eq!(mask_phone("12"), "xxx");
        assert_eq!(mask_phone("123"), "xxx");
        assert_eq!(mask_phone("1234"), "1xxx");
    }
}
