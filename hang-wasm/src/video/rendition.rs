use hang::catalog::Video;

/// Picks the best available video rendition from a catalog entry list.
///
/// "Best" means the smallest rendition whose pixel count (width * height)
/// still meets `pixel_budget`, so decoding never costs more than necessary
/// to satisfy the target; if none are large enough, the largest rendition
/// below budget is used instead so playback degrades gracefully rather than
/// refusing to play at all.
pub fn select_rendition<'a>(renditions: &'a [Video], pixel_budget: u32) -> Option<&'a Video> {
	let pixels = |v: &Video| -> u32 { v.config.coded_width.unwrap_or(0) * v.config.coded_height.unwrap_or(0) };

	renditions
		.iter()
		.filter(|v| pixels(v) >= pixel_budget)
		.min_by_key(|v| pixels(v))
		.or_else(|| renditions.iter().max_by_key(|v| pixels(v)))
}

/// Same as [`select_rendition`], but with no budget the largest supported
/// rendition wins outright rather than the smallest-that-fits-nothing.
pub fn select_rendition_with_budget<'a>(renditions: &'a [Video], pixel_budget: Option<u32>) -> Option<&'a Video> {
	match pixel_budget {
		Some(budget) => select_rendition(renditions, budget),
		None => {
			let pixels = |v: &Video| -> u32 { v.config.coded_width.unwrap_or(0) * v.config.coded_height.unwrap_or(0) };
			renditions.iter().max_by_key(|v| pixels(v))
		}
	}
}
