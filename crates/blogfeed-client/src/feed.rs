//! Feed loader.
//!
//! Lists every account owned by the program, then fetches and decodes each
//! one concurrently. The batch succeeds only if every account decodes.

use std::sync::Arc;

use solana_program::pubkey::Pubkey;
use tokio::task::JoinSet;
use tracing::debug;

use crate::errors::{FeedError, FeedResult};
use crate::post::PostRecord;
use crate::rpc::ChainRpc;

/// Load all posts owned by `program_id`, in the order the node lists them.
pub async fn load_feed<R: ChainRpc>(rpc: Arc<R>, program_id: Pubkey) -> FeedResult<Vec<PostRecord>> {
    let keys = rpc.program_accounts(&program_id).await?;
    debug!(accounts = keys.len(), %program_id, "program accounts listed");
    if keys.is_empty() {
        return Ok(Vec::new());
    }

    let mut tasks = JoinSet::new();
    for (index, key) in keys.iter().copied().enumerate() {
        let rpc = Arc::clone(&rpc);
        tasks.spawn(async move {
            let data = rpc.account_data(&key).await?;
            PostRecord::decode(key, &data).map(|post| (index, post))
        });
    }

    let mut slots: Vec<Option<PostRecord>> = vec![None; keys.len()];
    while let Some(joined) = tasks.join_next().await {
        let (index, post) = match joined {
            Ok(Ok(done)) => done,
            Ok(Err(e)) => {
                tasks.abort_all();
                return Err(e);
            }
            Err(e) => {
                tasks.abort_all();
                return Err(FeedError::FeedLoad(format!("decode task failed: {e}")));
            }
        };
        slots[index] = Some(post);
    }

    slots
        .into_iter()
        .map(|slot| slot.ok_or_else(|| FeedError::FeedLoad("missing decode result".to_string())))
        .collect()
}
