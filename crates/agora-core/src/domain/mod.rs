//! Domain entities - the core business objects.

mod user;

mod post;

pub use post::{Post, PostComment, PostCommentOwner, PostLikeOwner, PostOwner};
pub use user::{NewUser, User, UserProfile, UserProfileUpdate, UserUpdate};
