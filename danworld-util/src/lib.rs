pub mod math;

/// Strips the namespace of a resource key, `minecraft:grass_block` becomes `grass_block`.
#[inline]
pub fn strip_namespace(key: &str) -> &str {
    match key.split_once(':') {
        Some((_, path)) => path,
        None => key,
    }
}

#[cfg(test)]
mod tests {
    use super::strip_namespace;

    #[test]
    fn strips_only_the_namespace() {
        assert_eq!(strip_namespace("minecraft:grass_block"), "grass_block");
        assert_eq!(strip_namespace("stone"), "stone");
        assert_eq!(strip_namespace("mod:a:b"), "a:b");
    }
}
