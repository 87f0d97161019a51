//! HTML escaping for rendered text and attribute values

/// Escape HTML special characters
///
/// # Examples
///
/// ```
/// use modelform_render::escape_html;
///
/// let escaped = escape_html("<b>Tom & 'Jerry'</b>");
/// assert_eq!(escaped, "&lt;b&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/b&gt;");
/// ```
pub fn escape_html(input: &str) -> String {
	input
		.replace('&', "&amp;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
		.replace('"', "&quot;")
		.replace('\'', "&#x27;")
}

/// Escape a value placed inside a double-quoted attribute
///
/// Line breaks are encoded as well so multi-line values survive inside
/// `value="..."`.
///
/// # Examples
///
/// ```
/// use modelform_render::escape_html_attr;
///
/// let escaped = escape_html_attr("a\" onfocus=\"x\nb");
/// assert_eq!(escaped, "a&quot; onfocus=&quot;x&#10;b");
/// ```
pub fn escape_html_attr(input: &str) -> String {
	escape_html(input)
		.replace('\n', "&#10;")
		.replace('\r', "&#13;")
}
