use bloggraph_core::model::{Comment, Post};
use bloggraph_core::query::{list_comments, list_posts, list_users};
use bloggraph_core::resolver::{
    comment_author, comment_post, post_author, post_comments, user_comments, user_posts,
};
use bloggraph_core::{BlogStore, ErrorKind};

fn post_ids(posts: &[Post]) -> Vec<&str> {
    posts.iter().map(|p| p.id.as_str()).collect()
}

fn comment_ids(comments: &[Comment]) -> Vec<&str> {
    comments.iter().map(|c| c.id.as_str()).collect()
}

#[test]
fn test_post_author_round_trip() {
    let store = BlogStore::seeded();
    for post in list_posts(&store, None) {
        let author = post_author(&post, &store).unwrap();
        assert_eq!(author.id, post.author);
        assert!(user_posts(&author, &store).contains(&post));
    }
}

#[test]
fn test_user_relationships() {
    let store = BlogStore::seeded();
    let users = list_users(&store, None);
    let arya = &users[0];
    let sarah = &users[2];

    assert_eq!(post_ids(&user_posts(arya, &store)), vec!["1", "2"]);
    assert_eq!(comment_ids(&user_comments(arya, &store)), vec!["1", "2"]);
    assert!(user_posts(sarah, &store).is_empty());
    assert_eq!(comment_ids(&user_comments(sarah, &store)), vec!["4"]);
}

#[test]
fn test_post_comments_include_those_on_unpublished_posts() {
    let store = BlogStore::seeded();
    let posts = list_posts(&store, None);
    assert_eq!(comment_ids(&post_comments(&posts[0], &store)), vec!["1", "4"]);
    assert_eq!(comment_ids(&post_comments(&posts[1], &store)), vec!["2"]);
}

#[test]
fn test_comment_relationships() {
    let store = BlogStore::seeded();
    for comment in list_comments(&store) {
        assert_eq!(comment_author(&comment, &store).unwrap().id, comment.author);
        assert_eq!(comment_post(&comment, &store).unwrap().id, comment.post);
    }
}

#[test]
fn test_dangling_references_are_integrity_errors() {
    let store = BlogStore::seeded();

    let orphan_post = Post {
        id: "p".to_string(),
        title: "t".to_string(),
        body: "b".to_string(),
        published: true,
        author: "ghost".to_string(),
    };
    let err = post_author(&orphan_post, &store).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Integrity);
    assert!(err.to_string().contains("ghost"));

    let orphan_comment = Comment {
        id: "c".to_string(),
        text: "t".to_string(),
        author: "1".to_string(),
        post: "nowhere".to_string(),
    };
    assert!(comment_author(&orphan_comment, &store).is_ok());
    assert_eq!(
        comment_post(&orphan_comment, &store).unwrap_err().kind(),
        ErrorKind::Integrity
    );
}
